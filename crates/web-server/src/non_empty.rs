/// A `Vec` holding at least one element.
#[derive(Debug, Clone, PartialEq)]
pub struct NonEmpty<T>(Vec<T>);

impl<T> NonEmpty<T> {
    pub fn from_vec(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self(items))
        }
    }
}

impl<T> std::ops::Deref for NonEmpty<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> IntoIterator for NonEmpty<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::NonEmpty;

    #[test]
    fn rejects_empty_vec() {
        assert!(NonEmpty::<u8>::from_vec(Vec::new()).is_none());
    }

    #[test]
    fn keeps_order() {
        let items = NonEmpty::from_vec(vec![3, 1, 2]).unwrap();
        assert_eq!(items[0], 3);
        assert_eq!(items.len(), 3);
        assert_eq!(items.into_iter().collect::<Vec<_>>(), vec![3, 1, 2]);
    }
}
