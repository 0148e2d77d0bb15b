use std::fmt;

use arrow::datatypes::{DataType, TimeUnit};

use crate::error::{DecodeError, DecodeResult};

/// Identifier of a column's on-the-wire encoding.
///
/// Built-in constants use the CQL native protocol option ids. Any other id can
/// be constructed and registered for custom types.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TypeTag(u16);

impl TypeTag {
    /// `bigint`: signed 64-bit integer.
    pub const BIGINT: TypeTag = TypeTag(0x0002);
    /// `boolean`: one byte, non-zero is true.
    pub const BOOLEAN: TypeTag = TypeTag(0x0004);
    /// `counter`: signed 64-bit integer.
    pub const COUNTER: TypeTag = TypeTag(0x0005);
    /// `double`: IEEE 754 binary64.
    pub const DOUBLE: TypeTag = TypeTag(0x0007);
    /// `float`: IEEE 754 binary32.
    pub const FLOAT: TypeTag = TypeTag(0x0008);
    /// `int`: signed 32-bit integer.
    pub const INT: TypeTag = TypeTag(0x0009);
    /// `timestamp`: signed 64-bit milliseconds since the Unix epoch.
    pub const TIMESTAMP: TypeTag = TypeTag(0x000B);
    /// `date`: unsigned 32-bit day count with the Unix epoch at 2^31.
    pub const DATE: TypeTag = TypeTag(0x0011);
    /// `time`: signed 64-bit nanoseconds since midnight.
    pub const TIME: TypeTag = TypeTag(0x0012);
    /// `smallint`: signed 16-bit integer.
    pub const SMALLINT: TypeTag = TypeTag(0x0013);
    /// `tinyint`: signed 8-bit integer.
    pub const TINYINT: TypeTag = TypeTag(0x0014);

    /// Tag for an arbitrary option id.
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Raw option id.
    pub const fn id(self) -> u16 {
        self.0
    }

    /// CQL type name for the built-in tags.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            TypeTag::BIGINT => "bigint",
            TypeTag::BOOLEAN => "boolean",
            TypeTag::COUNTER => "counter",
            TypeTag::DOUBLE => "double",
            TypeTag::FLOAT => "float",
            TypeTag::INT => "int",
            TypeTag::TIMESTAMP => "timestamp",
            TypeTag::DATE => "date",
            TypeTag::TIME => "time",
            TypeTag::SMALLINT => "smallint",
            TypeTag::TINYINT => "tinyint",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "custom(0x{:04x})", self.0),
        }
    }
}

/// Native element type of a decoded column.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum ElementLayout {
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 32-bit integer.
    UInt32,
    /// IEEE 754 binary32.
    Float32,
    /// IEEE 754 binary64.
    Float64,
    /// Boolean, one byte per row on the wire, bit-packed once decoded.
    Boolean,
    /// Signed days since 1970-01-01.
    Date32,
    /// Signed milliseconds since the Unix epoch, no timezone.
    TimestampMillisecond,
    /// Signed nanoseconds since midnight.
    Time64Nanosecond,
}

impl ElementLayout {
    /// Bytes one element occupies on the wire.
    pub const fn width(self) -> usize {
        match self {
            ElementLayout::Int8 | ElementLayout::Boolean => 1,
            ElementLayout::Int16 => 2,
            ElementLayout::Int32
            | ElementLayout::UInt32
            | ElementLayout::Float32
            | ElementLayout::Date32 => 4,
            ElementLayout::Int64
            | ElementLayout::Float64
            | ElementLayout::TimestampMillisecond
            | ElementLayout::Time64Nanosecond => 8,
        }
    }

    /// Arrow type of the decoded array.
    pub fn data_type(self) -> DataType {
        match self {
            ElementLayout::Int8 => DataType::Int8,
            ElementLayout::Int16 => DataType::Int16,
            ElementLayout::Int32 => DataType::Int32,
            ElementLayout::Int64 => DataType::Int64,
            ElementLayout::UInt32 => DataType::UInt32,
            ElementLayout::Float32 => DataType::Float32,
            ElementLayout::Float64 => DataType::Float64,
            ElementLayout::Boolean => DataType::Boolean,
            ElementLayout::Date32 => DataType::Date32,
            ElementLayout::TimestampMillisecond => {
                DataType::Timestamp(TimeUnit::Millisecond, None)
            }
            ElementLayout::Time64Nanosecond => DataType::Time64(TimeUnit::Nanosecond),
        }
    }
}

/// Byte order of multi-byte elements in a column buffer.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first; what the CQL protocol sends.
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

impl ByteOrder {
    /// Byte order of the host.
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }

    /// Whether values in this order can be used without swapping.
    pub fn is_native(self) -> bool {
        self == Self::native()
    }
}

/// How one wire type maps onto a native array.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct TypeDescriptor {
    tag: TypeTag,
    element_width: usize,
    byte_order: ByteOrder,
    target_layout: ElementLayout,
}

impl TypeDescriptor {
    /// Big-endian descriptor using the layout's natural width.
    pub const fn new(tag: TypeTag, target_layout: ElementLayout) -> Self {
        Self {
            tag,
            element_width: target_layout.width(),
            byte_order: ByteOrder::Big,
            target_layout,
        }
    }

    /// Descriptor with an explicit element width, validated against the
    /// layout.
    pub fn try_new(
        tag: TypeTag,
        element_width: usize,
        target_layout: ElementLayout,
    ) -> DecodeResult<Self> {
        if element_width != target_layout.width() {
            return Err(DecodeError::InvalidDescriptor {
                tag,
                layout: target_layout,
                width: element_width,
            });
        }
        Ok(Self::new(tag, target_layout))
    }

    /// Same descriptor, reading elements in `byte_order`.
    pub const fn with_byte_order(self, byte_order: ByteOrder) -> Self {
        Self { byte_order, ..self }
    }

    /// Wire tag this descriptor answers for.
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Bytes per element on the wire.
    pub fn element_width(&self) -> usize {
        self.element_width
    }

    /// Byte order of the wire elements.
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Element type of the decoded array.
    pub fn target_layout(&self) -> ElementLayout {
        self.target_layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_display_names_builtin_and_custom() {
        assert_eq!(TypeTag::DATE.to_string(), "date");
        assert_eq!(TypeTag::TIMESTAMP.to_string(), "timestamp");
        assert_eq!(TypeTag::new(0x00ff).to_string(), "custom(0x00ff)");
        assert_eq!(TypeTag::new(0x0009), TypeTag::INT);
    }

    #[test]
    fn descriptor_uses_natural_width() {
        let desc = TypeDescriptor::new(TypeTag::BIGINT, ElementLayout::Int64);
        assert_eq!(desc.element_width(), 8);
        assert_eq!(desc.byte_order(), ByteOrder::Big);

        let desc = TypeDescriptor::new(TypeTag::BOOLEAN, ElementLayout::Boolean);
        assert_eq!(desc.element_width(), 1);
    }

    #[test]
    fn try_new_rejects_width_mismatch() {
        let err = TypeDescriptor::try_new(TypeTag::INT, 8, ElementLayout::Int32)
            .expect_err("width mismatch should fail");
        assert!(matches!(
            err,
            DecodeError::InvalidDescriptor {
                tag: TypeTag::INT,
                layout: ElementLayout::Int32,
                width: 8,
            }
        ));

        let desc = TypeDescriptor::try_new(TypeTag::INT, 4, ElementLayout::Int32).unwrap();
        assert_eq!(desc, TypeDescriptor::new(TypeTag::INT, ElementLayout::Int32));
    }

    #[test]
    fn layouts_report_arrow_types() {
        assert_eq!(ElementLayout::Date32.data_type(), DataType::Date32);
        assert_eq!(
            ElementLayout::TimestampMillisecond.data_type(),
            DataType::Timestamp(TimeUnit::Millisecond, None)
        );
        assert_eq!(
            ElementLayout::Time64Nanosecond.data_type(),
            DataType::Time64(TimeUnit::Nanosecond)
        );
    }
}
