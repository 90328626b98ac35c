use crate::location::Position;
use crate::photos::ImageHandle;

/// One scalar draft field together with its new value
#[derive(Debug, Clone, PartialEq)]
pub enum DraftField {
    Name(String),
    About(String),
    Instructions(String),
    OpeningHours(String),
    OpenOnWeekends(bool),
}

/// In-progress orphanage owned by a single creation session.
///
/// The position is fixed at construction; images can only be appended.
#[derive(Debug, Clone, PartialEq)]
pub struct OrphanageDraft {
    pub name: String,
    pub about: String,
    pub instructions: String,
    pub opening_hours: String,
    pub open_on_weekends: bool,
    position: Position,
    images: Vec<ImageHandle>,
}

impl OrphanageDraft {
    pub fn new(position: Position) -> Self {
        Self {
            name: String::new(),
            about: String::new(),
            instructions: String::new(),
            opening_hours: String::new(),
            open_on_weekends: true,
            position,
            images: Vec::new(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn images(&self) -> &[ImageHandle] {
        &self.images
    }

    pub fn apply(&mut self, field: DraftField) {
        match field {
            DraftField::Name(value) => self.name = value,
            DraftField::About(value) => self.about = value,
            DraftField::Instructions(value) => self.instructions = value,
            DraftField::OpeningHours(value) => self.opening_hours = value,
            DraftField::OpenOnWeekends(value) => self.open_on_weekends = value,
        }
    }

    pub fn push_image(&mut self, handle: ImageHandle) {
        self.images.push(handle);
    }
}
