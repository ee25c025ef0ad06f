use crate::api::models::{Company, PaymentKeys, Product, Sale, User};
use crate::core::pagination::Pager;
use crate::utils::assets::resolve_asset_url;
use crate::utils::masks;
use crate::utils::text::truncate_text_unicode;
use comfy_table::{Cell, Color, Table, presets};

const DESCRIPTION_WIDTH: usize = 40;

/// Formatter for list and detail output.
pub struct TableDisplay {
    use_colors: bool,
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDisplay {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    fn active_cell(&self, active: bool) -> Cell {
        let cell = Cell::new(if active { "active" } else { "inactive" });
        if !self.use_colors {
            return cell;
        }
        cell.fg(if active { Color::Green } else { Color::Red })
    }

    fn base_table(&self, header: Vec<&str>) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_BORDERS_ONLY);
        table.set_header(header);
        table
    }

    pub fn render_users(&self, users: &[User]) -> Table {
        let mut table = self.base_table(vec!["ID", "Name", "Email", "Phone", "Role", "Status"]);
        for user in users {
            table.add_row(vec![
                Cell::new(user.id.map_or_else(|| "-".to_string(), |id| id.to_string())),
                Cell::new(&user.name),
                Cell::new(&user.email),
                Cell::new(
                    user.phone
                        .as_deref()
                        .map(masks::mask_phone)
                        .unwrap_or_default(),
                ),
                Cell::new(user.role_id.map_or_else(String::new, |id| id.to_string())),
                self.active_cell(user.active),
            ]);
        }
        table
    }

    pub fn render_products(&self, products: &[Product], asset_base: &str) -> Table {
        let mut table =
            self.base_table(vec!["ID", "Name", "Price", "Description", "Image", "Status"]);
        for product in products {
            table.add_row(vec![
                Cell::new(
                    product
                        .id
                        .map_or_else(|| "-".to_string(), |id| id.to_string()),
                ),
                Cell::new(&product.name),
                Cell::new(format!("R$ {:.2}", product.price)),
                Cell::new(truncate_text_unicode(
                    product.description.as_deref().unwrap_or(""),
                    DESCRIPTION_WIDTH,
                )),
                Cell::new(
                    product
                        .image
                        .as_deref()
                        .map(|path| resolve_asset_url(asset_base, path))
                        .unwrap_or_default(),
                ),
                self.active_cell(product.active),
            ]);
        }
        table
    }

    pub fn render_sales(&self, sales: &[Sale]) -> Table {
        let mut table = self.base_table(vec!["ID", "Customer", "Total", "Status", "Date"]);
        for sale in sales {
            table.add_row(vec![
                Cell::new(sale.id.to_string()),
                Cell::new(sale.customer_name.as_deref().unwrap_or("-")),
                Cell::new(format!("R$ {:.2}", sale.total)),
                Cell::new(sale.status.as_deref().unwrap_or("-")),
                Cell::new(
                    sale.created_at
                        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
            ]);
        }
        table
    }

    /// Key/value detail view for the company profile. The stored payment-key
    /// blob is decoded here; a malformed one just renders as empty.
    pub fn render_company(&self, company: &Company, asset_base: &str) -> Table {
        let payment_keys = company
            .payment_keys
            .as_deref()
            .map(PaymentKeys::parse)
            .unwrap_or_default();

        let mut table = self.base_table(vec!["Field", "Value"]);
        table.add_row(vec!["Name".to_string(), company.name.clone()]);
        table.add_row(vec![
            "CNPJ".to_string(),
            company
                .cnpj
                .as_deref()
                .map(masks::mask_cnpj)
                .unwrap_or_default(),
        ]);
        table.add_row(vec![
            "Phone".to_string(),
            company
                .phone
                .as_deref()
                .map(masks::mask_phone)
                .unwrap_or_default(),
        ]);
        table.add_row(vec![
            "WhatsApp".to_string(),
            company
                .whatsapp
                .as_deref()
                .map(masks::mask_phone)
                .unwrap_or_default(),
        ]);
        table.add_row(vec![
            "Address".to_string(),
            company.address.clone().unwrap_or_default(),
        ]);
        table.add_row(vec![
            "Logo".to_string(),
            company
                .logo
                .as_deref()
                .map(|path| resolve_asset_url(asset_base, path))
                .unwrap_or_default(),
        ]);
        table.add_row(vec![
            "Theme color".to_string(),
            company.theme_color.clone().unwrap_or_default(),
        ]);
        table.add_row(vec![
            "PIX key".to_string(),
            payment_keys.pix.unwrap_or_default(),
        ]);
        table
    }

    /// List body plus the pagination footer.
    pub fn print_list(&self, table: Table, pager: &Pager) {
        println!("{}", table);
        println!("{}", pager.range_info());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, image: Option<&str>) -> Product {
        Product {
            id: Some(1),
            name: name.to_string(),
            description: Some("Feito na casa, entrega no mesmo dia".to_string()),
            price: 12.5,
            category_id: None,
            image: image.map(str::to_string),
            active: true,
        }
    }

    #[test]
    fn test_render_products_resolves_image_urls() {
        let display = TableDisplay::without_colors();
        let table = display.render_products(
            &[product("Bolo", Some("uploads/bolo.png"))],
            "https://api.x.com",
        );
        let rendered = table.to_string();
        assert!(rendered.contains("https://api.x.com/uploads/bolo.png"));
        assert!(rendered.contains("R$ 12.50"));
    }

    #[test]
    fn test_render_users_masks_phone() {
        let display = TableDisplay::without_colors();
        let user = User {
            id: Some(7),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: None,
            cpf: None,
            phone: Some("11987654321".to_string()),
            role_id: Some(2),
            active: false,
        };
        let rendered = display.render_users(&[user]).to_string();
        assert!(rendered.contains("(11) 98765-4321"));
        assert!(rendered.contains("inactive"));
    }

    #[test]
    fn test_render_company_tolerates_bad_payment_blob() {
        let display = TableDisplay::without_colors();
        let company = Company {
            id: Some(1),
            name: "Padaria Central".to_string(),
            cnpj: Some("11222333000181".to_string()),
            phone: None,
            whatsapp: None,
            address: None,
            logo: Some("/logo.png".to_string()),
            theme_color: Some("#ff6600".to_string()),
            payment_keys: Some("garbage{{".to_string()),
            active: true,
        };
        let rendered = display.render_company(&company, "https://api.x.com").to_string();
        assert!(rendered.contains("11.222.333/0001-81"));
        assert!(rendered.contains("/logo.png"));
    }
}
