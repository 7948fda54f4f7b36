//! Entry points used by a host: recognize cfg documents and open them.

use crate::cfg;
use crate::error::Error;
use crate::metadata::Metadata;
use crate::model::Model;

/// True when `identifier` has a `.cfg` extension (any case).
pub fn matches(identifier: &str) -> bool {
    identifier
        .rsplit('.')
        .next()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("cfg"))
}

/// Parse cfg text into a model.
///
/// Either the whole document loads or an [`Error::Load`] naming `identifier`
/// is returned.
pub fn open(identifier: &str, text: &str, metadata: &Metadata) -> Result<Model, Error> {
    let sections = cfg::read(text).map_err(|err| Error::load(err, identifier))?;
    log::debug!("{identifier}: {} sections", sections.len());
    Ok(Model::new(metadata, sections))
}
