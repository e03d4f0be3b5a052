use reqwest::header::HeaderMap;


/// Appends every value of `src` to `dst`.
///
/// Values already present in `dst` are never replaced, a name present
/// in both maps ends up with the values of both.
pub fn merge_headers(dst: &mut HeaderMap, src: &HeaderMap) {
    for (name, value) in src.iter() {
        dst.append(name.clone(), value.clone());
    }
}
