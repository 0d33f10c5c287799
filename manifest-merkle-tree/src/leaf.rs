//! Canonical leaf encoding for manifest records.
//!
//! A record becomes the UTF-8 bytes of `"{name}:{cid}"`. Nothing is escaped:
//! a name or content identifier containing `:` can collide with another
//! record (`"a:b" + "c"` vs `"a" + "b:c"`). Changing the encoding would change
//! every existing root, so keeping inputs separator-free is left to the
//! producer of the records.

/// Separator placed between the name and the content identifier.
pub const LEAF_SEPARATOR: char = ':';

/// Encode a `(name, cid)` pair into leaf bytes. No hashing happens here.
pub fn encode_leaf(name: &str, cid: &str) -> Vec<u8> {
    let mut out = String::with_capacity(name.len() + 1 + cid.len());
    out.push_str(name);
    out.push(LEAF_SEPARATOR);
    out.push_str(cid);
    out.into_bytes()
}

/// Records that can be turned into leaf bytes.
pub trait LeafEncode {
    /// The canonical, unhashed leaf bytes of this record.
    fn leaf_bytes(&self) -> Vec<u8>;
}

impl<T: LeafEncode + ?Sized> LeafEncode for &T {
    fn leaf_bytes(&self) -> Vec<u8> {
        (**self).leaf_bytes()
    }
}

impl<N: AsRef<str>, C: AsRef<str>> LeafEncode for (N, C) {
    fn leaf_bytes(&self) -> Vec<u8> {
        encode_leaf(self.0.as_ref(), self.1.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_leaf_layout() {
        assert_eq!(encode_leaf("cat.png", "bafy123"), b"cat.png:bafy123".to_vec());
        assert_eq!(encode_leaf("", ""), b":".to_vec());
    }

    #[test]
    fn test_encode_leaf_keeps_utf8() {
        let bytes = encode_leaf("ñandú.jpg", "Qm1");
        assert_eq!(String::from_utf8(bytes).expect("utf8"), "ñandú.jpg:Qm1");
    }

    #[test]
    fn test_separator_in_fields_is_not_escaped() {
        // Known ambiguity of the format: these two records share leaf bytes.
        assert_eq!(encode_leaf("a:b", "c"), encode_leaf("a", "b:c"));
    }

    #[test]
    fn test_tuple_records() {
        let record = ("file.txt", String::from("cid"));
        assert_eq!(record.leaf_bytes(), b"file.txt:cid".to_vec());
        assert_eq!((&record).leaf_bytes(), b"file.txt:cid".to_vec());
    }
}
