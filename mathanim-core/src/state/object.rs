use crate::{color::Color, id::AnimObjId};

/// Which color property of an object a command addresses.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, strum::Display, strum::EnumString)]
pub enum PropertyKind {
    #[strum(to_string = "fill_color", serialize = "fill")]
    FillColor,
    #[strum(to_string = "stroke_color", serialize = "stroke")]
    StrokeColor,
}

/// A single object in the scene tree.
///
/// Only the state that commands can mutate lives here, the timeline and render data are owned elsewhere.
#[derive(Clone, PartialEq, Debug)]
pub struct AnimObject {
    // NOT public, the store keys its lookups on this!
    id: AnimObjId,
    pub name: String,
    pub fill_color: Color,
    pub stroke_color: Color,
}
impl AnimObject {
    /// A new object with black fill and stroke.
    #[must_use]
    pub fn new(id: AnimObjId, name: String) -> Self {
        Self {
            id,
            name,
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
        }
    }
    #[must_use]
    pub fn id(&self) -> AnimObjId {
        self.id
    }
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
    #[must_use]
    pub fn color(&self, kind: PropertyKind) -> Color {
        match kind {
            PropertyKind::FillColor => self.fill_color,
            PropertyKind::StrokeColor => self.stroke_color,
        }
    }
    pub fn color_mut(&mut self, kind: PropertyKind) -> &mut Color {
        match kind {
            PropertyKind::FillColor => &mut self.fill_color,
            PropertyKind::StrokeColor => &mut self.stroke_color,
        }
    }
}

#[cfg(test)]
mod test {
    use super::PropertyKind;
    #[test]
    fn property_names() {
        assert_eq!("fill".parse(), Ok(PropertyKind::FillColor));
        assert_eq!("stroke_color".parse(), Ok(PropertyKind::StrokeColor));
        assert!("opacity".parse::<PropertyKind>().is_err());
        assert_eq!(PropertyKind::FillColor.to_string(), "fill_color");
    }
}
