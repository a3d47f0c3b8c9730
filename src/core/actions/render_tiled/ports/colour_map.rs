use crate::core::data::colour::Colour;

pub trait ColourMap {
    type T;

    fn map(&self, value: Self::T) -> Colour;
}
