use crate::error::RenderError;

/// Number of numbered texture slots a renderer exposes.
pub const MAX_TEXTURE_UNITS: u32 = 16;

/// Fixed-capacity table of textures bound to numbered units.
///
/// The grid shader samples nothing; the table exists so shaders that do can pick up
/// their inputs by unit number when their bind groups are built.
#[derive(Debug)]
pub struct TextureUnits<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for TextureUnits<T> {
    fn default() -> Self {
        Self::with_capacity(MAX_TEXTURE_UNITS)
    }
}

impl<T> TextureUnits<T> {
    pub fn with_capacity(capacity: u32) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Binds `texture` to `unit`, returning whatever was bound there before.
    pub fn bind(&mut self, unit: u32, texture: T) -> Result<Option<T>, RenderError> {
        let capacity = self.capacity();
        let slot = self
            .slots
            .get_mut(unit as usize)
            .ok_or(RenderError::TextureUnitOutOfRange { unit, capacity })?;
        Ok(slot.replace(texture))
    }

    pub fn get(&self, unit: u32) -> Option<&T> {
        self.slots.get(unit as usize).and_then(Option::as_ref)
    }
}
