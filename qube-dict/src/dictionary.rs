/// Decode capability for one dictionary-encoded column.
pub trait Dictionary: Send + Sync {
    /// Decode an encoded id back to its string value, `None` when the id is
    /// out of the dictionary's range.
    fn decode(&self, id: i64) -> Option<String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory dictionary: ids are positions in the value list.
#[derive(Clone, Debug, Default)]
pub struct MemDictionary {
    values: Vec<String>,
}

impl MemDictionary {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Reverse lookup, handy for building test fixtures.
    pub fn id_of(&self, value: &str) -> Option<i64> {
        self.values.iter().position(|v| v == value).map(|p| p as i64)
    }
}

impl Dictionary for MemDictionary {
    fn decode(&self, id: i64) -> Option<String> {
        if id < 0 {
            return None;
        }
        self.values.get(id as usize).cloned()
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_round_trip() {
        let dict = MemDictionary::new(["apple", "pear", "plum"]);
        assert_eq!(dict.id_of("pear"), Some(1));
        assert_eq!(dict.decode(1).as_deref(), Some("pear"));
        assert_eq!(dict.decode(3), None);
        assert_eq!(dict.decode(-1), None);
    }
}
