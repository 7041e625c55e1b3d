//! Helpers for fixed-slot key arrays.

/// Moves empty (zero) slots to the end of the key list. Some hosts stop
/// reading a boot report at the first empty slot.
///
/// The order of the held keys is not preserved: an empty slot found from the
/// front is filled with the last held key found from the back.
///
/// `[0x00, 0x01, 0x00, 0x03, 0x02, 0x00]` becomes
/// `[0x02, 0x01, 0x03, 0x00, 0x00, 0x00]`.
pub fn sort_keycodes<T: Copy + Default + PartialEq>(keys: &mut [T]) {
    if keys.is_empty() {
        return;
    }

    let empty = T::default();
    let mut front = 0;
    let mut back = keys.len() - 1;

    while front < back {
        if keys[front] == empty {
            while keys[back] == empty && back > front {
                back -= 1;
            }
            keys.swap(front, back);
        }
        front += 1;
    }
}

/// Fills the first empty slot with `key`. A key that is already held is
/// accepted without being added twice.
///
/// Returns `false` when every slot is taken.
pub fn insert_key<T: Copy + Default + PartialEq>(keys: &mut [T], key: T) -> bool {
    let empty = T::default();

    for slot in keys.iter_mut() {
        if *slot == key {
            return true;
        }
        if *slot == empty {
            *slot = key;
            return true;
        }
    }

    false
}

/// Clears every slot holding `key` and compacts the list.
///
/// Returns `true` if the key was held.
pub fn remove_key<T: Copy + Default + PartialEq>(keys: &mut [T], key: T) -> bool {
    let empty = T::default();
    let mut found = false;

    // a key should only ever be present once, but clear every copy
    for slot in keys.iter_mut().filter(|slot| **slot == key) {
        *slot = empty;
        found = true;
    }

    if found {
        sort_keycodes(keys);
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_keycodes() {
        let mut keys = [0x00u8, 0x01, 0x00, 0x03, 0x02, 0x00];
        sort_keycodes(&mut keys);
        assert_eq!(keys, [0x02, 0x01, 0x03, 0x00, 0x00, 0x00]);

        let mut keys = [0x01u8, 0x00, 0x00, 0x03, 0x00, 0x02];
        sort_keycodes(&mut keys);
        assert_eq!(keys, [0x01, 0x02, 0x03, 0x00, 0x00, 0x00]);

        let mut keys = [0x00u8, 0x00, 0x00, 0x03, 0x01, 0x02];
        sort_keycodes(&mut keys);
        assert_eq!(keys, [0x02, 0x01, 0x03, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_sort_keycodes_degenerate() {
        let mut empty: [u8; 0] = [];
        sort_keycodes(&mut empty);

        let mut zeros = [0u8; 6];
        sort_keycodes(&mut zeros);
        assert_eq!(zeros, [0; 6]);

        let mut wide = [0u16, 0x00E9, 0, 0x00CD];
        sort_keycodes(&mut wide);
        assert_eq!(wide, [0x00CD, 0x00E9, 0, 0]);
    }

    #[test]
    fn test_insert_and_remove() {
        let mut keys = [0u8; 3];
        assert!(insert_key(&mut keys, 4));
        assert!(insert_key(&mut keys, 5));
        assert!(insert_key(&mut keys, 4));
        assert_eq!(keys, [4, 5, 0]);

        assert!(insert_key(&mut keys, 6));
        assert!(!insert_key(&mut keys, 7));

        assert!(remove_key(&mut keys, 4));
        assert_eq!(keys, [6, 5, 0]);
        assert!(!remove_key(&mut keys, 9));
    }
}
