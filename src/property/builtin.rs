use super::{MetadataOptions, OwnerKind, Property, PropertyDefinition, PropertyId, PropertyType};
use crate::style::{BoxModel, Brush, Color, FontStyle, Orientation, SizeValue, Visibility};
use crate::types::Thickness;
use smol_str::SmolStr;

macro_rules! builtin_properties {
    ($(
        $(#[$meta:meta])*
        $konst:ident: $ty:ty = $owner:ident . $name:literal, $default:expr, $options:expr;
    )*) => {
        #[repr(u32)]
        #[allow(non_camel_case_types)]
        enum BuiltinSlot {
            $($konst,)*
        }

        $(
            $(#[$meta])*
            pub const $konst: Property<$ty> =
                Property::from_raw(PropertyId(BuiltinSlot::$konst as u32));
        )*

        pub(super) fn builtin_definitions() -> Vec<PropertyDefinition> {
            vec![$(
                PropertyDefinition::new(
                    PropertyId(BuiltinSlot::$konst as u32),
                    OwnerKind::$owner,
                    SmolStr::new_static($name),
                    <$ty as PropertyType>::into_value($default),
                    $options,
                ),
            )*]
        }
    };
}

const IGNORE: MetadataOptions = MetadataOptions::IGNORE_INHERITANCE;
const INHERITS: MetadataOptions = MetadataOptions::INHERITS;
const MEASURE: MetadataOptions = MetadataOptions::AFFECTS_MEASURE;
const ARRANGE: MetadataOptions = MetadataOptions::AFFECTS_ARRANGE;
const RENDER: MetadataOptions = MetadataOptions::AFFECTS_RENDER;

builtin_properties! {
    WIDTH: SizeValue = ELEMENT."Width", SizeValue::Auto, IGNORE.union(MEASURE);
    HEIGHT: SizeValue = ELEMENT."Height", SizeValue::Auto, IGNORE.union(MEASURE);
    MIN_WIDTH: f32 = ELEMENT."MinWidth", 0.0, IGNORE.union(MEASURE);
    MIN_HEIGHT: f32 = ELEMENT."MinHeight", 0.0, IGNORE.union(MEASURE);
    MARGIN: Thickness = ELEMENT."Margin", Thickness::ZERO, IGNORE.union(MEASURE).union(ARRANGE);
    PADDING: Thickness = ELEMENT."Padding", Thickness::ZERO, IGNORE.union(MEASURE).union(ARRANGE);
    /// Flow discipline for the element's children.
    BOX: BoxModel = ELEMENT."Box", BoxModel::Block, IGNORE.union(MEASURE);
    ORIENTATION: Orientation = ELEMENT."Orientation", Orientation::Vertical, IGNORE.union(MEASURE);
    IS_MOUSE_OVER: bool = ELEMENT."IsMouseOver", false, IGNORE.union(RENDER);

    VISIBILITY: Visibility = VISUAL."Visibility", Visibility::Visible, IGNORE.union(MEASURE).union(RENDER);
    BACKGROUND: Brush = VISUAL."Background", Brush::TRANSPARENT, IGNORE.union(RENDER);
    OPACITY: f32 = VISUAL."Opacity", 1.0, IGNORE.union(RENDER);
    /// Text and glyph colour. Inherited by descendants.
    FOREGROUND: Color = VISUAL."Foreground", Color::BLACK, INHERITS.union(RENDER);
    FONT_SIZE: f32 = VISUAL."FontSize", 12.0, INHERITS.union(MEASURE);
    FONT_STYLE: FontStyle = VISUAL."FontStyle", FontStyle::Regular, INHERITS.union(MEASURE);

    BORDER_THICKNESS: Thickness = BORDER."BorderThickness", Thickness::ZERO, IGNORE.union(MEASURE).union(ARRANGE);
    BORDER_BRUSH: Brush = BORDER."BorderBrush", Brush::TRANSPARENT, IGNORE.union(RENDER);
    CORNER_RADIUS: f32 = BORDER."CornerRadius", 0.0, IGNORE.union(RENDER);

    TEXT: SmolStr = LABEL."Text", SmolStr::new_static(""), IGNORE.union(MEASURE);
    /// Texture name resolved through the skin.
    SOURCE: SmolStr = IMAGE."Source", SmolStr::new_static(""), IGNORE.union(MEASURE);
}
