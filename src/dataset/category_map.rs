/// Categories of the labelled scene collection, in label order.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["animals", "man_made", "nature", "people"];

/// Ordered name to label mapping. The label of a category is its position.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct CategoryMap {
    names: Vec<String>
}

impl CategoryMap {
    pub fn new(names: &[String]) -> CategoryMap {
        CategoryMap{names: names.to_vec()}
    }

    pub fn index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(|n| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `(label, name)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().map(|n| n.as_str()).enumerate()
    }
}

impl Default for CategoryMap {
    fn default() -> CategoryMap {
        CategoryMap{names: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_order() {
        let map = CategoryMap::default();

        assert_eq!(map.len(), 4);
        assert_eq!(map.index("nature"), Some(2));
        assert_eq!(map.name(1), Some("man_made"));
        assert_eq!(map.index("vehicles"), None);
        assert_eq!(map.iter().last(), Some((3, "people")));
    }
}
