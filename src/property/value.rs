use crate::style::{BoxModel, Brush, Color, FontStyle, Orientation, SizeValue, Visibility};
use crate::types::Thickness;
use smol_str::SmolStr;

/// Storage representation of every property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Float(f32),
    Int(i32),
    Size(SizeValue),
    Thickness(Thickness),
    Color(Color),
    Brush(Brush),
    Visibility(Visibility),
    BoxModel(BoxModel),
    Orientation(Orientation),
    FontStyle(FontStyle),
    Text(SmolStr),
}

impl PropertyValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Float(_) => "f32",
            Self::Int(_) => "i32",
            Self::Size(_) => "SizeValue",
            Self::Thickness(_) => "Thickness",
            Self::Color(_) => "Color",
            Self::Brush(_) => "Brush",
            Self::Visibility(_) => "Visibility",
            Self::BoxModel(_) => "BoxModel",
            Self::Orientation(_) => "Orientation",
            Self::FontStyle(_) => "FontStyle",
            Self::Text(_) => "Text",
        }
    }

    pub fn same_type(&self, other: &PropertyValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Equality used to suppress no-op writes. Unlike `==`, a NaN float
    /// equals another NaN so repeated writes settle.
    pub fn same_value(&self, other: &PropertyValue) -> bool {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => same_f32(*a, *b),
            (Self::Size(SizeValue::Px(a)), Self::Size(SizeValue::Px(b))) => same_f32(*a, *b),
            (Self::Thickness(a), Self::Thickness(b)) => {
                same_f32(a.left, b.left)
                    && same_f32(a.top, b.top)
                    && same_f32(a.right, b.right)
                    && same_f32(a.bottom, b.bottom)
            }
            _ => self == other,
        }
    }
}

fn same_f32(a: f32, b: f32) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Rust types that can be stored as a property value.
pub trait PropertyType: Clone + PartialEq + Default + 'static {
    fn into_value(self) -> PropertyValue;
    fn from_value(value: &PropertyValue) -> Option<Self>;
}

macro_rules! property_type {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl PropertyType for $ty {
                fn into_value(self) -> PropertyValue {
                    PropertyValue::$variant(self)
                }

                fn from_value(value: &PropertyValue) -> Option<Self> {
                    match value {
                        PropertyValue::$variant(inner) => Some(inner.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

property_type! {
    bool => Bool,
    f32 => Float,
    i32 => Int,
    SizeValue => Size,
    Thickness => Thickness,
    Color => Color,
    Brush => Brush,
    Visibility => Visibility,
    BoxModel => BoxModel,
    Orientation => Orientation,
    FontStyle => FontStyle,
    SmolStr => Text,
}
