//! Reusable predicates over model entities.
//!
//! Descriptions are phrased to read naturally after `classes that ...` or
//! `should ...`, e.g. `reside in a package that is annotated with @NullMarked`.

pub mod access;
pub mod annotated;
pub mod class;
pub mod dependency;
pub mod member;

pub use annotated::{annotated_with, annotated_with_any, annotated_with_where, meta_annotated_with};
pub use member::{declared_in, modifier, name, name_starting_with};

/// Simple name of a binary type name, used in descriptions.
pub(crate) fn simple(type_name: &str) -> &str {
    let after_package = type_name.rfind('.').map_or(type_name, |i| &type_name[i + 1..]);
    after_package
        .rfind('$')
        .map_or(after_package, |i| &after_package[i + 1..])
}
