use crate::catalog::{ColorVariant, Package};

/// Builds a Shopify cart permalink: `https://<shop>/cart/<variant>:<qty>,...?discount=<code>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CartLink {
    lines: Vec<(String, u32)>,
    discount: Option<String>,
}

impl CartLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, variant_id: &str, quantity: u32) -> Self {
        if quantity == 0 {
            return self;
        }
        match self.lines.iter_mut().find(|(id, _)| id == variant_id) {
            Some((_, existing)) => *existing += quantity,
            None => self.lines.push((variant_id.to_string(), quantity)),
        }
        self
    }

    pub fn discount(mut self, code: &str) -> Self {
        self.discount = Some(code.to_string());
        self
    }

    /// A package bought in one color: `quantity` units of that variant plus its code.
    pub fn for_package(package: &Package, color: &ColorVariant) -> Self {
        let link = Self::new().line(color.variant_id, package.quantity);
        match package.discount_code {
            Some(code) => link.discount(code),
            None => link,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn build(&self, shop_domain: &str) -> String {
        let lines = self
            .lines
            .iter()
            .map(|(id, qty)| format!("{}:{}", urlencoding::encode(id), qty))
            .collect::<Vec<_>>()
            .join(",");
        let mut url = format!("https://{}/cart/{}", shop_domain, lines);
        if let Some(code) = &self.discount {
            url.push_str("?discount=");
            url.push_str(&urlencoding::encode(code));
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{package, PackageKey, COLOR_VARIANTS};

    #[test]
    fn package_link_carries_quantity_and_code() {
        let link = CartLink::for_package(package(PackageKey::Double), &COLOR_VARIANTS[0]);
        assert_eq!(
            link.build("shop.example"),
            "https://shop.example/cart/44120938692887:2?discount=DUO20"
        );
    }

    #[test]
    fn basic_package_has_no_discount() {
        let link = CartLink::for_package(package(PackageKey::Basic), &COLOR_VARIANTS[1]);
        assert_eq!(link.build("shop.example"), "https://shop.example/cart/44120938725655:1");
    }

    #[test]
    fn repeated_variant_is_merged_and_zero_skipped() {
        let link = CartLink::new().line("1", 1).line("2", 0).line("1", 2);
        assert_eq!(link.build("s"), "https://s/cart/1:3");
        assert!(CartLink::new().line("3", 0).is_empty());
    }

    #[test]
    fn discount_code_is_encoded() {
        let link = CartLink::new().line("1", 1).discount("SPRING SALE&");
        assert_eq!(link.build("s"), "https://s/cart/1:1?discount=SPRING%20SALE%26");
    }
}
