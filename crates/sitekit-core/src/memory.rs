//! In-memory surfaces.
//!
//! These implement the presentation traits over plain collections. They back
//! the crate's own tests and any host that runs the controller without a
//! document.

use crate::field::FieldId;
use crate::notify::{Notification, NotificationId};
use crate::surface::{Decoration, FormSurface, NotificationSurface};
use std::collections::{BTreeMap, BTreeSet};

/// A form held in memory.
#[derive(Debug, Clone)]
pub struct MemoryForm {
    values: BTreeMap<FieldId, String>,
    decorations: BTreeMap<FieldId, Decoration>,
    submit_label: String,
    submit_disabled: bool,
}

impl MemoryForm {
    /// A form with every field present and empty.
    #[must_use]
    pub fn new(submit_label: impl Into<String>) -> Self {
        Self {
            values: FieldId::ALL.into_iter().map(|f| (f, String::new())).collect(),
            decorations: BTreeMap::new(),
            submit_label: submit_label.into(),
            submit_disabled: false,
        }
    }

    pub fn set_value(&mut self, field: FieldId, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Drops a field, as if the markup lacked it.
    pub fn remove_field(&mut self, field: FieldId) {
        self.values.remove(&field);
        self.decorations.remove(&field);
    }

    #[must_use]
    pub fn is_submit_disabled(&self) -> bool {
        self.submit_disabled
    }
}

impl FormSurface for MemoryForm {
    fn value(&self, field: FieldId) -> Option<String> {
        self.values.get(&field).cloned()
    }

    fn decorate(&mut self, field: FieldId, decoration: Decoration) {
        if self.values.contains_key(&field) {
            self.decorations.insert(field, decoration);
        }
    }

    fn decoration(&self, field: FieldId) -> Decoration {
        self.decorations.get(&field).copied().unwrap_or_default()
    }

    fn reset(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
    }

    fn submit_label(&self) -> Option<String> {
        Some(self.submit_label.clone())
    }

    fn set_submit(&mut self, label: &str, disabled: bool) {
        self.submit_label = label.to_string();
        self.submit_disabled = disabled;
    }
}

/// Toasts held in memory, with counters for assertions.
#[derive(Debug, Default, Clone)]
pub struct MemoryToasts {
    mounted: Vec<Notification>,
    exiting: BTreeSet<NotificationId>,
    mounts: usize,
    unmounts: usize,
}

impl MemoryToasts {
    /// Notifications currently in the page, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.mounted.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mounted.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mounted.is_empty()
    }

    #[must_use]
    pub fn is_exiting(&self, id: NotificationId) -> bool {
        self.exiting.contains(&id)
    }

    /// Number of `mount` calls so far.
    #[must_use]
    pub fn mount_count(&self) -> usize {
        self.mounts
    }

    /// Number of `unmount` calls that removed something.
    #[must_use]
    pub fn unmount_count(&self) -> usize {
        self.unmounts
    }
}

impl NotificationSurface for MemoryToasts {
    fn mount(&mut self, notification: &Notification) {
        self.mounts += 1;
        self.mounted.push(notification.clone());
    }

    fn start_exit(&mut self, id: NotificationId) {
        if self.mounted.iter().any(|n| n.id == id) {
            self.exiting.insert(id);
        }
    }

    fn unmount(&mut self, id: NotificationId) {
        let before = self.mounted.len();
        self.mounted.retain(|n| n.id != id);
        self.exiting.remove(&id);
        if self.mounted.len() != before {
            self.unmounts += 1;
        }
    }
}
