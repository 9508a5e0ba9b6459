use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use super::Value;

/// Read access to the live record a form is bound to.
///
/// `None` means the attribute is not set at all, which is distinct from an
/// attribute explicitly set to [`Value::Null`]. The engine only ever reads
/// through this trait.
pub trait DataSource {
    fn get(&self, attribute: &str) -> Option<Value>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn get(&self, attribute: &str) -> Option<Value> {
        (**self).get(attribute)
    }
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn get(&self, attribute: &str) -> Option<Value> {
        (**self).get(attribute)
    }
}

impl<T: DataSource + ?Sized> DataSource for Rc<T> {
    fn get(&self, attribute: &str) -> Option<Value> {
        (**self).get(attribute)
    }
}

impl<T: DataSource + ?Sized> DataSource for Arc<T> {
    fn get(&self, attribute: &str) -> Option<Value> {
        (**self).get(attribute)
    }
}

impl<T: DataSource> DataSource for RefCell<T> {
    fn get(&self, attribute: &str) -> Option<Value> {
        self.borrow().get(attribute)
    }
}

impl DataSource for HashMap<String, Value> {
    fn get(&self, attribute: &str) -> Option<Value> {
        HashMap::get(self, attribute).cloned()
    }
}

/// An in-memory record: attribute name to [`Value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    attributes: HashMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, builder style.
    #[must_use]
    pub fn set(mut self, attribute: &str, value: impl Into<Value>) -> Self {
        self.insert(attribute, value);
        self
    }

    /// Set an attribute (mutable reference version).
    pub fn insert(&mut self, attribute: &str, value: impl Into<Value>) {
        self.attributes.insert(attribute.to_owned(), value.into());
    }

    /// Unset an attribute, returning its previous value.
    pub fn remove(&mut self, attribute: &str) -> Option<Value> {
        self.attributes.remove(attribute)
    }

    /// Look up an attribute without cloning it.
    #[must_use]
    pub fn value(&self, attribute: &str) -> Option<&Value> {
        self.attributes.get(attribute)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Build a record from the top-level keys of a JSON object. Anything
    /// other than an object yields an empty record.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Self {
        let attributes = json
            .as_object()
            .map(|obj| {
                obj.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect()
            })
            .unwrap_or_default();
        Self { attributes }
    }
}

impl DataSource for Record {
    fn get(&self, attribute: &str) -> Option<Value> {
        self.attributes.get(attribute).cloned()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attributes: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
