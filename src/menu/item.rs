use anyhow::Result;

use crate::resources::{Icon, ResId, Resources};

/// One entry of a quick action popup: icon and title, plus the id reported
/// back when it is activated.
///
/// `selected` is flipped by whatever drives the menu. `sticky` entries keep
/// the popup open after activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionItem<I = Icon> {
    icon: Option<I>,
    title: String,
    action_id: i32,
    selected: bool,
    sticky: bool,
}

impl<I> Default for ActionItem<I> {
    fn default() -> Self {
        Self {
            icon: None,
            title: String::new(),
            action_id: Self::UNSET_ID,
            selected: false,
            sticky: false,
        }
    }
}

impl<I> ActionItem<I> {
    /// Id of an entry that never had one assigned. Only `Default` produces it;
    /// the constructors store whatever id they are given, `-1` included.
    pub const UNSET_ID: i32 = -1;

    pub fn new(action_id: i32, title: impl Into<String>) -> Self {
        Self::init(action_id, title.into(), None)
    }

    pub fn with_icon(action_id: i32, title: impl Into<String>, icon: I) -> Self {
        Self::init(action_id, title.into(), Some(icon))
    }

    /// Title looked up from `title_res`, no icon.
    pub fn from_resource_title<R>(res: &R, action_id: i32, title_res: ResId) -> Result<Self>
    where
        R: Resources<Image = I> + ?Sized,
    {
        let title = res.string(title_res)?;
        Ok(Self::init(action_id, title, None))
    }

    /// Literal title, icon looked up from `icon_res`.
    pub fn from_resource_icon<R>(
        res: &R,
        action_id: i32,
        title: impl Into<String>,
        icon_res: ResId,
    ) -> Result<Self>
    where
        R: Resources<Image = I> + ?Sized,
    {
        let icon = res.image(icon_res)?;
        Ok(Self::init(action_id, title.into(), Some(icon)))
    }

    /// Both looked up. The title is always resolved first.
    pub fn from_resource_both<R>(
        res: &R,
        action_id: i32,
        title_res: ResId,
        icon_res: ResId,
    ) -> Result<Self>
    where
        R: Resources<Image = I> + ?Sized,
    {
        let title = res.string(title_res)?;
        let icon = res.image(icon_res)?;
        Ok(Self::init(action_id, title, Some(icon)))
    }

    pub fn from_resource_title_with_icon<R>(
        res: &R,
        action_id: i32,
        title_res: ResId,
        icon: I,
    ) -> Result<Self>
    where
        R: Resources<Image = I> + ?Sized,
    {
        let title = res.string(title_res)?;
        Ok(Self::init(action_id, title, Some(icon)))
    }

    fn init(action_id: i32, title: String, icon: Option<I>) -> Self {
        Self {
            icon,
            title,
            action_id,
            selected: false,
            sticky: false,
        }
    }

    pub fn sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn icon(&self) -> Option<&I> {
        self.icon.as_ref()
    }

    pub fn set_icon(&mut self, icon: Option<I>) {
        self.icon = icon;
    }

    pub fn take_icon(&mut self) -> Option<I> {
        self.icon.take()
    }

    pub fn action_id(&self) -> i32 {
        self.action_id
    }

    pub fn set_action_id(&mut self, action_id: i32) {
        self.action_id = action_id;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    pub fn set_sticky(&mut self, sticky: bool) {
        self.sticky = sticky;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::resources::{ResourceError, ResourceTable};

    fn table() -> ResourceTable {
        let mut table = ResourceTable::new();
        table
            .insert_string(1, "Add")
            .insert_string(2, "Accept")
            .insert_icon(10, Icon::new("icons/add.png"));
        table
    }

    #[test]
    fn plain_entry_defaults() {
        let item: ActionItem = ActionItem::new(3, "Upload");
        assert_eq!(item.action_id(), 3);
        assert_eq!(item.title(), "Upload");
        assert!(item.icon().is_none());
        assert!(!item.is_selected());
        assert!(!item.is_sticky());
    }

    #[test]
    fn icon_is_stored_as_given() {
        let icon = Icon::new("icons/up.png");
        let item = ActionItem::with_icon(4, "Up", icon.clone());
        assert_eq!(item.icon(), Some(&icon));

        let mut item = item;
        assert_eq!(item.take_icon(), Some(icon));
        assert!(item.icon().is_none());
        item.set_icon(Some(Icon::new("icons/down.png")));
        assert!(item.icon().is_some());
    }

    #[test]
    fn flags_are_last_write_wins() {
        let mut item: ActionItem = ActionItem::new(1, "Add");
        for v in [true, true, false, true] {
            item.set_selected(v);
            item.set_sticky(!v);
        }
        assert!(item.is_selected());
        assert!(!item.is_sticky());
    }

    #[test]
    fn explicit_minus_one_is_kept() {
        let item: ActionItem = ActionItem::new(-1, "Anything");
        assert_eq!(item.action_id(), ActionItem::<Icon>::UNSET_ID);
        assert_eq!(item.title(), "Anything");

        let unset: ActionItem = ActionItem::default();
        assert_eq!(unset.action_id(), -1);
        assert!(unset.title().is_empty());
    }

    #[test]
    fn resource_constructors_resolve() {
        let res = table();

        let item = ActionItem::from_resource_both(&res, 1, 1, 10).unwrap();
        assert_eq!(item.title(), res.string(1).unwrap());
        assert_eq!(item.icon(), Some(&res.image(10).unwrap()));

        let item = ActionItem::from_resource_title(&res, 2, 2).unwrap();
        assert_eq!(item.title(), "Accept");
        assert!(item.icon().is_none());

        let item = ActionItem::from_resource_icon(&res, 5, "Literal", 10).unwrap();
        assert_eq!(item.title(), "Literal");
        assert_eq!(
            item.icon().map(Icon::path),
            Some(std::path::Path::new("icons/add.png"))
        );

        let item =
            ActionItem::from_resource_title_with_icon(&res, 6, 1, Icon::new("x.png")).unwrap();
        assert_eq!(item.title(), "Add");
        assert_eq!(item.icon(), Some(&Icon::new("x.png")));
    }

    #[test]
    fn resolution_failure_propagates_unchanged() {
        let res = table();

        let err = ActionItem::from_resource_both(&res, 1, 99, 10).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ResourceError>(),
            Some(&ResourceError::UnknownString(99))
        );

        let err = ActionItem::from_resource_both(&res, 1, 1, 99).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ResourceError>(),
            Some(&ResourceError::UnknownImage(99))
        );

        assert!(ActionItem::from_resource_icon(&res, 1, "t", 42).is_err());
    }

    struct Recorder {
        calls: RefCell<Vec<String>>,
    }

    impl Resources for Recorder {
        type Image = u32;

        fn string(&self, id: ResId) -> Result<String> {
            self.calls.borrow_mut().push(format!("string {id}"));
            Ok(format!("s{id}"))
        }

        fn image(&self, id: ResId) -> Result<u32> {
            self.calls.borrow_mut().push(format!("image {id}"));
            anyhow::ensure!(id >= 0, "negative image id");
            Ok(id as u32)
        }
    }

    #[test]
    fn title_resolves_before_icon() {
        let rec = Recorder {
            calls: RefCell::new(Vec::new()),
        };
        let item = ActionItem::from_resource_both(&rec, 1, 7, 8).unwrap();
        assert_eq!(item.title(), "s7");
        assert_eq!(item.icon(), Some(&8));
        assert_eq!(*rec.calls.borrow(), vec!["string 7", "image 8"]);

        rec.calls.borrow_mut().clear();
        assert!(ActionItem::from_resource_both(&rec, 1, 7, -1).is_err());
        assert_eq!(*rec.calls.borrow(), vec!["string 7", "image -1"]);
    }

    #[test]
    fn works_through_trait_objects() {
        let res = table();
        let dyn_res: &dyn Resources<Image = Icon> = &res;
        let item = ActionItem::from_resource_title(dyn_res, 9, 1).unwrap();
        assert_eq!(item.title(), "Add");
    }
}
