use super::OwnerKind;
use crate::error::{LayoutError, LayoutResult};
use bitflags::bitflags;
use smol_str::SmolStr;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MetadataOptions: u8 {
        /// Only the local store and the default are consulted on read.
        const IGNORE_INHERITANCE = 1 << 0;
        /// Explicitly inheritable. Properties are inheritable unless
        /// `IGNORE_INHERITANCE` is set; this flag documents intent.
        const INHERITS = 1 << 1;
        const AFFECTS_MEASURE = 1 << 2;
        const AFFECTS_ARRANGE = 1 << 3;
        const AFFECTS_RENDER = 1 << 4;
    }
}

impl MetadataOptions {
    pub fn inherits(self) -> bool {
        !self.contains(Self::IGNORE_INHERITANCE)
    }

    pub fn affects_measure(self) -> bool {
        self.contains(Self::AFFECTS_MEASURE)
    }

    /// Measure invalidation always implies re-arrangement.
    pub fn affects_arrange(self) -> bool {
        self.intersects(Self::AFFECTS_MEASURE | Self::AFFECTS_ARRANGE)
    }

    pub fn affects_render(self) -> bool {
        self.contains(Self::AFFECTS_RENDER)
    }

    pub(crate) fn validate(self, owner: OwnerKind, name: &SmolStr) -> LayoutResult<()> {
        if self.contains(Self::INHERITS | Self::IGNORE_INHERITANCE) {
            return Err(LayoutError::InvalidMetadataCombination {
                owner,
                name: name.clone(),
                reason: "INHERITS conflicts with IGNORE_INHERITANCE",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MetadataOptions;
    use crate::error::LayoutError;
    use crate::property::OwnerKind;

    #[test]
    fn inheritance_is_the_default() {
        assert!(MetadataOptions::empty().inherits());
        assert!(MetadataOptions::INHERITS.inherits());
        assert!(!MetadataOptions::IGNORE_INHERITANCE.inherits());
    }

    #[test]
    fn measure_implies_arrange() {
        let options = MetadataOptions::AFFECTS_MEASURE;
        assert!(options.affects_measure());
        assert!(options.affects_arrange());
        let arrange_only = MetadataOptions::AFFECTS_ARRANGE;
        assert!(!arrange_only.affects_measure());
        assert!(arrange_only.affects_arrange());
    }

    #[test]
    fn conflicting_inheritance_flags_are_rejected() {
        let options = MetadataOptions::INHERITS | MetadataOptions::IGNORE_INHERITANCE;
        let err = options
            .validate(OwnerKind::ELEMENT, &"Broken".into())
            .expect_err("conflicting flags");
        assert!(matches!(err, LayoutError::InvalidMetadataCombination { .. }));
    }
}
