//! Dispatch table from wire type tags to decode strategies.
//!
//! A registry is built and extended up front, then shared read-only with
//! every [`RowSetAssembler`](crate::RowSetAssembler). Registration takes
//! `&mut self`, so once the registry is borrowed or wrapped in an `Arc` for
//! decoding it can no longer change underneath a page.

use std::collections::HashMap;

use crate::{
    error::{DecodeError, DecodeResult},
    observability::log_debug,
    temporal::AdjustRule,
    types::{ElementLayout, TypeDescriptor, TypeTag},
};

/// Types the stock accelerated decoder understands without extension.
const BUILTIN_DESCRIPTORS: [TypeDescriptor; 9] = [
    TypeDescriptor::new(TypeTag::TINYINT, ElementLayout::Int8),
    TypeDescriptor::new(TypeTag::SMALLINT, ElementLayout::Int16),
    TypeDescriptor::new(TypeTag::INT, ElementLayout::Int32),
    TypeDescriptor::new(TypeTag::BIGINT, ElementLayout::Int64),
    TypeDescriptor::new(TypeTag::COUNTER, ElementLayout::Int64),
    TypeDescriptor::new(TypeTag::FLOAT, ElementLayout::Float32),
    TypeDescriptor::new(TypeTag::DOUBLE, ElementLayout::Float64),
    TypeDescriptor::new(TypeTag::BOOLEAN, ElementLayout::Boolean),
    TypeDescriptor::new(TypeTag::TIME, ElementLayout::Time64Nanosecond),
];

/// Mapping from wire type tag to [`TypeDescriptor`], plus the temporal
/// adjustment rules some tags need after decoding.
///
/// Entries are added or overwritten, never removed.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    descriptors: HashMap<TypeTag, TypeDescriptor>,
    adjustments: HashMap<TypeTag, AdjustRule>,
}

impl TypeRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in fixed-width numeric types.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for descriptor in BUILTIN_DESCRIPTORS {
            registry.register(descriptor);
        }
        registry
    }

    /// Built-in types plus `date` and `timestamp`.
    pub fn with_temporal() -> Self {
        let mut registry = Self::with_defaults();
        registry.register_temporal_types();
        registry
    }

    /// Add or overwrite the mapping for `descriptor.tag()`, returning the
    /// previous descriptor.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> Option<TypeDescriptor> {
        log_debug!(
            component = "registry",
            event = "type_registered",
            tag = %descriptor.tag(),
            layout = ?descriptor.target_layout(),
            width = descriptor.element_width(),
        );
        self.descriptors.insert(descriptor.tag(), descriptor)
    }

    /// Attach a post-decode adjustment to `tag`, returning the previous rule.
    pub fn register_adjustment(&mut self, tag: TypeTag, rule: AdjustRule) -> Option<AdjustRule> {
        log_debug!(
            component = "registry",
            event = "adjustment_registered",
            tag = %tag,
            offset = rule.offset,
            source_unit = ?rule.source_unit,
            target_unit = ?rule.target_unit,
        );
        self.adjustments.insert(tag, rule)
    }

    /// Register `date` and `timestamp`.
    ///
    /// `date` decodes as raw unsigned 32-bit days and is shifted by
    /// [`DATE_EPOCH_OFFSET`](crate::DATE_EPOCH_OFFSET) into `Date32`.
    /// `timestamp` needs no shift: the wire already carries signed
    /// milliseconds since the Unix epoch.
    pub fn register_temporal_types(&mut self) {
        self.register(TypeDescriptor::new(TypeTag::DATE, ElementLayout::UInt32));
        self.register_adjustment(TypeTag::DATE, AdjustRule::cql_date());
        self.register(TypeDescriptor::new(
            TypeTag::TIMESTAMP,
            ElementLayout::TimestampMillisecond,
        ));
    }

    /// Descriptor for `tag`.
    pub fn resolve(&self, tag: TypeTag) -> DecodeResult<&TypeDescriptor> {
        self.descriptors
            .get(&tag)
            .ok_or(DecodeError::UnknownType { tag })
    }

    /// Adjustment rule for `tag`, if any.
    pub fn adjustment(&self, tag: TypeTag) -> Option<&AdjustRule> {
        self.adjustments.get(&tag)
    }

    /// Whether `tag` resolves.
    pub fn contains(&self, tag: TypeTag) -> bool {
        self.descriptors.contains_key(&tag)
    }

    /// Registered tags, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = TypeTag> + '_ {
        self.descriptors.keys().copied()
    }

    /// Number of registered tags.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether no tag is registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
