use super::{BackPolicy, CloseType, MenuCategory, MenuId};
use crate::context::MenuContext;
use crate::screen::Screen;
use std::fmt;
use std::rc::Rc;

/// Callback bound to a button, run with the context that owns the menu
pub type Action = Rc<dyn Fn(&mut MenuContext)>;

/// Builds the screen of a freshly instantiated menu
pub type ScreenFactory = Rc<dyn Fn(&MenuId) -> Box<dyn Screen>>;

/// Template a live [`Menu`](super::Menu) is instantiated from
///
/// # Example
///
/// ```ignore
/// let prototype = MenuPrototype::new(OPTIONS, |_| Box::new(HeadlessScreen::new("options", ["SaveButton"])))
///     .with_close_type(CloseType::Hide)
///     .with_category(MenuCategory::Options)
///     .bind("SaveButton", |ctx| ctx.save_settings());
/// ```
#[derive(Clone)]
pub struct MenuPrototype {
    pub(crate) id: MenuId,
    pub(crate) close_type: CloseType,
    pub(crate) category: MenuCategory,
    pub(crate) base_order: i32,
    pub(crate) back_policy: Option<BackPolicy>,
    pub(crate) back_hook: Option<Action>,
    pub(crate) bindings: Vec<(String, Action)>,
    pub(crate) screen_factory: ScreenFactory,
}

impl MenuPrototype {
    /// Creates a prototype with `Destroy` close type and `Generic` category
    pub fn new<F>(id: MenuId, screen_factory: F) -> Self
    where
        F: Fn(&MenuId) -> Box<dyn Screen> + 'static,
    {
        MenuPrototype {
            id,
            close_type: CloseType::default(),
            category: MenuCategory::default(),
            base_order: 0,
            back_policy: None,
            back_hook: None,
            bindings: Vec::new(),
            screen_factory: Rc::new(screen_factory),
        }
    }

    pub fn with_close_type(mut self, close_type: CloseType) -> Self {
        self.close_type = close_type;
        self
    }

    pub fn with_category(mut self, category: MenuCategory) -> Self {
        self.category = category;
        self
    }

    /// Render order the menu starts with before it is stacked on anything
    pub fn with_base_order(mut self, order: i32) -> Self {
        self.base_order = order;
        self
    }

    /// Overrides the category's default back policy
    pub fn with_back_policy(mut self, policy: BackPolicy) -> Self {
        self.back_policy = Some(policy);
        self
    }

    /// Runs after the back policy whenever the menu receives a back press
    pub fn on_back<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut MenuContext) + 'static,
    {
        self.back_hook = Some(Rc::new(hook));
        self
    }

    /// Binds a button to an action
    pub fn bind<F>(mut self, button: impl Into<String>, action: F) -> Self
    where
        F: Fn(&mut MenuContext) + 'static,
    {
        self.bindings.push((button.into(), Rc::new(action)));
        self
    }

    pub fn id(&self) -> &MenuId {
        &self.id
    }

    pub fn close_type(&self) -> CloseType {
        self.close_type
    }

    pub fn category(&self) -> MenuCategory {
        self.category
    }

    /// Back policy in effect: the override, or the category default
    pub fn effective_back_policy(&self) -> BackPolicy {
        self.back_policy
            .unwrap_or_else(|| BackPolicy::for_category(self.category))
    }
}

impl fmt::Debug for MenuPrototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuPrototype")
            .field("id", &self.id)
            .field("close_type", &self.close_type)
            .field("category", &self.category)
            .field("base_order", &self.base_order)
            .field("back_policy", &self.back_policy)
            .field(
                "buttons",
                &self.bindings.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
