//! Spatial domain tags attached to expressions and variables.

use std::fmt;

/// An ordered list of named spatial regions an expression is defined over.
///
/// An empty domain means the expression is domain-agnostic (a scalar in
/// space). Region names are free-form strings such as `"negative particle"`
/// or `"separator"`; ordering is meaningful for concatenated quantities that
/// span several adjacent regions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Domain(Vec<String>);

impl Domain {
    /// The empty, domain-agnostic domain.
    pub fn none() -> Self {
        Domain(Vec::new())
    }

    /// Build a domain from an ordered list of region names.
    pub fn new<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Domain(regions.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn regions(&self) -> &[String] {
        &self.0
    }

    /// Combine two domains for a binary operation.
    ///
    /// An empty side defers to the other; equal domains combine to
    /// themselves. Returns `None` when both sides are non-empty and
    /// different, in which case the expressions cannot appear in the same
    /// arithmetic node.
    pub fn combine(&self, other: &Domain) -> Option<Domain> {
        if self.is_empty() {
            Some(other.clone())
        } else if other.is_empty() || self == other {
            Some(self.clone())
        } else {
            None
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

impl From<&str> for Domain {
    fn from(region: &str) -> Self {
        Domain(vec![region.to_string()])
    }
}

impl From<String> for Domain {
    fn from(region: String) -> Self {
        Domain(vec![region])
    }
}

impl From<Vec<String>> for Domain {
    fn from(regions: Vec<String>) -> Self {
        Domain(regions)
    }
}

/// Recognized boundary locations of a one-dimensional spatial region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundarySide {
    Left,
    Right,
}

impl fmt::Display for BoundarySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundarySide::Left => write!(f, "left"),
            BoundarySide::Right => write!(f, "right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_domain_defers_to_other_side() {
        let scalar = Domain::none();
        let particle = Domain::from("negative particle");

        assert_eq!(
            scalar.combine(&particle),
            Some(particle.clone()),
            "an empty domain should adopt the other side"
        );
        assert_eq!(particle.combine(&scalar), Some(particle.clone()));
        assert_eq!(scalar.combine(&Domain::none()), Some(Domain::none()));
    }

    #[test]
    fn equal_domains_combine_to_themselves() {
        let a = Domain::new(["negative electrode", "separator"]);
        let b = Domain::new(["negative electrode", "separator"]);
        assert_eq!(a.combine(&b), Some(a.clone()));
    }

    #[test]
    fn mismatched_domains_refuse_to_combine() {
        let a = Domain::from("negative particle");
        let b = Domain::from("positive particle");
        assert!(
            a.combine(&b).is_none(),
            "distinct non-empty domains must not combine"
        );
    }

    #[test]
    fn region_order_is_significant() {
        let forward = Domain::new(["negative electrode", "separator"]);
        let reversed = Domain::new(["separator", "negative electrode"]);
        assert_ne!(forward, reversed);
    }

    #[test]
    fn display_renders_region_list() {
        assert_eq!(Domain::none().to_string(), "[]");
        assert_eq!(
            Domain::new(["negative electrode", "separator"]).to_string(),
            "[negative electrode, separator]"
        );
        assert_eq!(BoundarySide::Left.to_string(), "left");
        assert_eq!(BoundarySide::Right.to_string(), "right");
    }
}
