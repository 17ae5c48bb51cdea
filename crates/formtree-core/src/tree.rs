//! Widget tree: named, ordered, exclusively owned children
//!
//! A parent owns its children in insertion order. Instead of a back-pointer
//! each node keeps the names of its ancestors, refreshed whenever it is
//! inserted or renamed, which is all error annotation needs.
use crate::error::WidgetError;
use crate::widget::Widget;

/// Alphanumerics only, not starting with a digit.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

impl Widget {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), WidgetError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(WidgetError::InvalidName(name));
        }
        self.name = Some(name);
        let parents = self.parents.clone();
        self.reparent(parents);
        Ok(())
    }

    /// Names from the root down to this widget.
    pub fn path(&self) -> Vec<String> {
        let mut path = self.parents.clone();
        if let Some(name) = &self.name {
            path.push(name.clone());
        }
        path
    }

    pub fn dotted_path(&self) -> String {
        self.path().join(".")
    }

    /// Attaches `child` under `key`, naming it after the key if unnamed.
    ///
    /// Returns the child previously stored under `key`, if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        mut child: Widget,
    ) -> Result<Option<Widget>, WidgetError> {
        let key = key.into();
        if !is_valid_name(&key) {
            return Err(WidgetError::InvalidName(key));
        }
        if child.name.is_none() {
            child.name = Some(key.clone());
        }
        child.reparent(self.path());
        Ok(self.children.insert(key, child))
    }

    pub fn remove(&mut self, key: &str) -> Option<Widget> {
        let mut child = self.children.shift_remove(key)?;
        child.reparent(Vec::new());
        Some(child)
    }

    pub fn get(&self, key: &str) -> Option<&Widget> {
        self.children.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Widget> {
        self.children.get_mut(key)
    }

    /// Like [`Widget::get_mut`] but fails with [`WidgetError::MissingChild`].
    pub fn child_mut(&mut self, key: &str) -> Result<&mut Widget, WidgetError> {
        let path = self.path();
        self.children
            .get_mut(key)
            .ok_or_else(|| WidgetError::MissingChild {
                path,
                child: key.to_string(),
            })
    }

    pub fn child_names(&self) -> Vec<String> {
        self.children.keys().cloned().collect()
    }

    pub fn children(&self) -> impl Iterator<Item = (&str, &Widget)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn children_mut(&mut self) -> impl Iterator<Item = (&str, &mut Widget)> {
        self.children.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn reparent(&mut self, parents: Vec<String>) {
        self.parents = parents;
        let path = self.path();
        for child in self.children.values_mut() {
            child.reparent(path.clone());
        }
    }
}
