use crate::Float;

#[repr(u8)]
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum ImageEncoding {
    U8,
    F64
}

impl ImageEncoding {
    pub fn max_value(&self) -> Float {
        match self {
            ImageEncoding::U8 => 255.0,
            ImageEncoding::F64 => 1.0
        }
    }

    // https://en.wikipedia.org/wiki/Normalization_(image_processing)
    pub fn normalize_to_unit(&self, value: Float) -> Float {
        value / self.max_value()
    }
}
