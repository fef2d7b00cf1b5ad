use std::collections::HashSet;

/// Names already bound to a resolved record during one run.
///
/// Names are only ever added. A fresh set is used for every run so that
/// separate inputs never share assignments.
#[derive(Debug, Clone, Default)]
pub struct AssignedNames {
    names: HashSet<String>,
    order: Vec<String>,
}

impl AssignedNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Record `name` as assigned. Returns false if it already was.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.names.contains(&name) {
            return false;
        }
        self.names.insert(name.clone());
        self.order.push(name);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Assigned names in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_once() {
        let mut assigned = AssignedNames::new();

        assert!(assigned.insert("Carlos Vega"));
        assert!(!assigned.insert("Carlos Vega"));
        assert!(assigned.insert("Ana Ruiz"));

        assert_eq!(assigned.len(), 2);
        assert!(assigned.contains("Carlos Vega"));
        assert!(!assigned.contains("carlos vega"));
        assert_eq!(assigned.iter().collect::<Vec<_>>(), vec!["Carlos Vega", "Ana Ruiz"]);
    }
}
