use std::borrow::Cow;

/// Convert an internal class name (`net/minecraft/server/Entity`) into its dotted form
#[inline]
pub fn dotted_class_name(name: &str) -> Cow<str> {
    if name.contains('/') {
        Cow::Owned(name.replace('/', "."))
    } else {
        Cow::Borrowed(name)
    }
}

/// Split a whitespace separated line into its tokens
#[inline]
pub fn tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}
