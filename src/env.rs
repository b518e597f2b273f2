// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Typesetting environment

use crate::fonts::{FontProvider, SystemFonts};
use crate::hyphen::{DictionaryProvider, NoDictionaries};
use std::sync::Arc;

/// External collaborators used for measurement and hyphenation
///
/// An `Environment` is cheap to clone and may be shared between threads.
#[derive(Clone, Debug)]
pub struct Environment {
    fonts: Arc<dyn FontProvider>,
    dictionaries: Arc<dyn DictionaryProvider>,
}

impl Environment {
    /// Construct with a font provider
    ///
    /// No hyphenation dictionaries are available until set with
    /// [`Self::with_dictionaries`].
    pub fn new(fonts: Arc<dyn FontProvider>) -> Self {
        Environment {
            fonts,
            dictionaries: Arc::new(NoDictionaries),
        }
    }

    /// Construct using the fonts installed on the system
    pub fn system() -> Self {
        Self::new(Arc::new(SystemFonts::new()))
    }

    /// Set the hyphenation dictionary provider
    #[must_use]
    pub fn with_dictionaries(mut self, dictionaries: Arc<dyn DictionaryProvider>) -> Self {
        self.dictionaries = dictionaries;
        self
    }

    /// The font provider
    pub fn fonts(&self) -> &dyn FontProvider {
        self.fonts.as_ref()
    }

    /// The hyphenation dictionary provider
    pub fn dictionaries(&self) -> &dyn DictionaryProvider {
        self.dictionaries.as_ref()
    }
}
