use deunicode::deunicode;

/// Lowercase, diacritic-free, hyphen-separated form of `name`.
///
/// Runs of anything that is not an ASCII letter or digit collapse into one hyphen, and the
/// result never starts or ends with a hyphen. Returns an empty string when nothing survives.
pub fn slugify(name: &str) -> String {
    let ascii = deunicode(name);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_hyphen = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
