//! Value Sizer Module
//!
//! Maps cached values to the unit the cache capacity is measured in.

// == Sizer Trait ==
/// Reports the size of a value that is, or is about to be, cached.
///
/// The unit is up to the caller but must match the capacity given to the
/// cache. Each value is sized once, when it is admitted. That size is what
/// gets released on eviction or invalidation.
pub trait Sizer<V> {
    fn size_of(&self, value: &V) -> u64;
}

impl<V, F> Sizer<V> for F
where
    F: Fn(&V) -> u64,
{
    fn size_of(&self, value: &V) -> u64 {
        self(value)
    }
}

/// Every value counts as one, making the capacity a maximum entry count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemCount;

impl<V> Sizer<V> for ItemCount {
    fn size_of(&self, _value: &V) -> u64 {
        1
    }
}

/// Values count by their byte length, making the capacity a byte budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByteLen;

impl<V: AsRef<[u8]>> Sizer<V> for ByteLen {
    fn size_of(&self, value: &V) -> u64 {
        value.as_ref().len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_count() {
        assert_eq!(ItemCount.size_of(&"anything"), 1);
        assert_eq!(ItemCount.size_of(&vec![0u8; 500]), 1);
    }

    #[test]
    fn test_byte_len() {
        assert_eq!(ByteLen.size_of(&vec![0u8; 60]), 60);
        assert_eq!(ByteLen.size_of(&String::from("hello")), 5);
        assert_eq!(ByteLen.size_of(&Vec::<u8>::new()), 0);
    }

    #[test]
    fn test_closure_sizer() {
        let sizer = |value: &Vec<u32>| value.len() as u64 * 4;
        assert_eq!(sizer.size_of(&vec![1, 2, 3]), 12);
    }
}
