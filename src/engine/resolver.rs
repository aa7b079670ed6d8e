use tracing::debug;

use crate::{
    core::locator::{GridLocator, InvalidLocator},
    summit::SummitLookup,
    types::{CoordinateSource, Resolved},
};

/// Resolves a station position from its summit reference or grid locator.
///
/// A summit reference wins whenever it is present. If the lookup does not
/// find it the result is `Ok(None)`; the grid locator on the same record is
/// not tried. Only a malformed locator is an error.
pub fn resolve<L: SummitLookup + ?Sized>(
    summit_ref: Option<&str>,
    locator: Option<&str>,
    lookup: &L,
) -> Result<Option<Resolved>, InvalidLocator> {
    if let Some(reference) = summit_ref {
        let found = lookup.lookup(reference);
        debug!(reference, found = found.is_some(), "summit resolution");
        return Ok(found.map(|loc| Resolved {
            coord: loc.to_coordinate(),
            source: CoordinateSource::Summit,
        }));
    }

    match locator {
        Some(raw) => {
            let grid = GridLocator::parse(raw)?;
            Ok(Some(Resolved {
                coord: grid.to_coordinate(),
                source: CoordinateSource::Locator,
            }))
        }
        None => Ok(None),
    }
}
