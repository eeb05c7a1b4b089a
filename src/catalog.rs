//! Static catalog of the products the shop resells. Each product maps to
//! one worksheet tab in the spreadsheet.

/// A product whose accounts are tracked in the spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    Turnitin,
    Canva,
    Deepl,
    SciteAi,
    Duolingo,
    Ms365,
    Camscanner,
}

impl Product {
    pub const ALL: [Product; 7] = [
        Product::Turnitin,
        Product::Canva,
        Product::Deepl,
        Product::SciteAi,
        Product::Duolingo,
        Product::Ms365,
        Product::Camscanner,
    ];

    /// Stable key used in callback data.
    pub fn key(self) -> &'static str {
        match self {
            Product::Turnitin => "turnitin",
            Product::Canva => "canva",
            Product::Deepl => "deepl",
            Product::SciteAi => "scite_ai",
            Product::Duolingo => "duolingo",
            Product::Ms365 => "ms365",
            Product::Camscanner => "camscanner",
        }
    }

    /// Human-readable name shown in chat.
    pub fn title(self) -> &'static str {
        match self {
            Product::Turnitin => "Turnitin",
            Product::Canva => "Canva",
            Product::Deepl => "DeepL",
            Product::SciteAi => "Scite AI",
            Product::Duolingo => "Duolingo",
            Product::Ms365 => "MS 365",
            Product::Camscanner => "CamScanner",
        }
    }

    /// Worksheet tab title. No spaces; the A1 range syntax would need
    /// quoting otherwise.
    pub fn sheet_tab(self) -> &'static str {
        self.key()
    }

    pub fn icon(self) -> &'static str {
        match self {
            Product::Turnitin => "📚",
            _ => "✨",
        }
    }

    pub fn from_key(key: &str) -> Option<Product> {
        Product::ALL.into_iter().find(|p| p.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for product in Product::ALL {
            assert_eq!(Product::from_key(product.key()), Some(product));
        }
    }

    #[test]
    fn test_unknown_key_is_none() {
        assert_eq!(Product::from_key("netflix"), None);
        assert_eq!(Product::from_key(""), None);
    }

    #[test]
    fn test_tabs_have_no_spaces() {
        for product in Product::ALL {
            assert!(!product.sheet_tab().contains(' '));
        }
    }
}
