use lopdf::{Document, Object, ObjectId};

// Guards against cyclic /Parent chains in malformed files.
const MAX_TREE_DEPTH: usize = 64;

const US_LETTER: (f64, f64) = (612.0, 792.0);

/// Unrotated page size and rotation in degrees (0, 90, 180 or 270).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub rotation: i64,
}

impl PageGeometry {
    /// Size as displayed, with width and height swapped for quarter turns.
    pub fn displayed(&self) -> (f64, f64) {
        if self.rotation % 180 == 0 {
            (self.width, self.height)
        } else {
            (self.height, self.width)
        }
    }
}

/// Looks up `key` on the page, then on each ancestor `/Pages` node.
pub fn inherited_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut dict = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = dict.get(key) {
            return resolve(doc, value);
        }

        let parent_id = match dict.get(b"Parent") {
            Ok(obj) => obj.as_reference().ok()?,
            Err(_) => return None,
        };
        dict = doc.get_dictionary(parent_id).ok()?;
    }

    None
}

pub fn page_geometry(doc: &Document, page_id: ObjectId) -> PageGeometry {
    let visible = inherited_attribute(doc, page_id, b"CropBox")
        .and_then(|obj| rectangle(doc, obj))
        .or_else(|| inherited_attribute(doc, page_id, b"MediaBox").and_then(|obj| rectangle(doc, obj)));

    let (width, height) = visible.unwrap_or(US_LETTER);

    let rotation = inherited_attribute(doc, page_id, b"Rotate")
        .and_then(|obj| obj.as_i64().ok())
        .map(|r| r.rem_euclid(360))
        .unwrap_or(0);

    PageGeometry {
        width,
        height,
        rotation,
    }
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn rectangle(doc: &Document, obj: &Object) -> Option<(f64, f64)> {
    let items = obj.as_array().ok()?;
    if items.len() != 4 {
        return None;
    }

    let mut coords = [0.0; 4];
    for (slot, item) in coords.iter_mut().zip(items) {
        *slot = number(resolve(doc, item)?)?;
    }

    let width = (coords[2] - coords[0]).abs();
    let height = (coords[3] - coords[1]).abs();
    if width > 0.0 && height > 0.0 {
        Some((width, height))
    } else {
        None
    }
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}
