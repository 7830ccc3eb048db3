use crate::layouts::LayoutId;

/// Layout settings remembered per view.
///
/// Index 0 belongs to the view of all tags, index `n` to the view whose lowest tag is `n - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pertag {
    pub curtag: usize,
    pub prevtag: usize,
    pub nmasters: Vec<i32>,
    pub mfacts: Vec<f32>,
    pub sellts: Vec<usize>,
    pub ltidxs: Vec<[LayoutId; 2]>,
}

impl Pertag {
    pub fn new(tag_count: usize, nmaster: i32, mfact: f32, lt: [LayoutId; 2], sellt: usize) -> Self {
        let slots = tag_count + 1;
        Self {
            curtag: 1,
            prevtag: 1,
            nmasters: vec![nmaster; slots],
            mfacts: vec![mfact; slots],
            sellts: vec![sellt; slots],
            ltidxs: vec![lt; slots],
        }
    }
}
