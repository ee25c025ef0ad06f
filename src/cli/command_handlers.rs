use crate::api::models::{PaymentKeys, Product, User};
use crate::api::query::{ListFilter, ListQuery};
use crate::cli::dispatcher::Dispatcher;
use crate::cli::main_types::{CompanyCommands, ProductCommands, SaleCommands, UserCommands};
use crate::core::fetch::ListState;
use crate::core::forms::{FieldMask, FormDraft, PASSWORD_FIELD, Rule};
use crate::core::pagination::{Pager, clamp_page, total_pages};
use crate::core::services::{
    CompanyService, ProductService, RecordService, SaleService, UserService,
};
use crate::core::toggle::{StatusToggle, ToggleAction};
use crate::display::TableDisplay;
use crate::error::{AppError, CliError, ValidationError};
use crate::utils::masks;
use serde_json::json;
use std::io::{self, Write};

fn user_draft(id: Option<u32>) -> FormDraft {
    let draft = match id {
        Some(id) => FormDraft::edit(id),
        None => FormDraft::create(),
    };
    draft
        .field("name", FieldMask::None, true)
        .field("email", FieldMask::None, true)
        .field(PASSWORD_FIELD, FieldMask::None, false)
        .field("cpf", FieldMask::Cpf, false)
        .field("phone", FieldMask::Phone, false)
        .rule(Rule::ExactDigits {
            field: "cpf",
            count: masks::CPF_DIGITS,
        })
        .rule(Rule::Email { field: "email" })
        .business_rule(|draft| {
            if draft.is_update() || !draft.get(PASSWORD_FIELD).is_empty() {
                Ok(())
            } else {
                Err(ValidationError::BusinessRule {
                    message: "password is required when creating a user".to_string(),
                })
            }
        })
}

fn product_draft(id: Option<u32>) -> FormDraft {
    let draft = match id {
        Some(id) => FormDraft::edit(id),
        None => FormDraft::create(),
    };
    draft
        .field("name", FieldMask::None, true)
        .field("description", FieldMask::None, false)
        .field("image", FieldMask::None, false)
}

fn company_draft(id: u32) -> FormDraft {
    FormDraft::edit(id)
        .field("name", FieldMask::None, true)
        .field("cnpj", FieldMask::Cnpj, false)
        .field("phone", FieldMask::Phone, false)
        .field("whatsapp", FieldMask::Phone, false)
        .field("address", FieldMask::None, false)
        .field("logo", FieldMask::None, false)
        .field("theme_color", FieldMask::None, false)
        .rule(Rule::ExactDigits {
            field: "cnpj",
            count: masks::CNPJ_DIGITS,
        })
}

impl Dispatcher {
    fn confirm_prompt(&self, message: &str) -> crate::Result<bool> {
        print!("{} [y/N]: ", message);
        let _ = io::stdout().flush();

        let mut input = String::new();
        io::stdin().read_line(&mut input).map_err(|e| {
            CliError::InvalidArguments(format!("Failed to read confirmation: {}", e))
        })?;
        Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    /// One guarded fetch for a list view. A requested page past the end of
    /// the result set is retried once at the clamped page, so the rendered
    /// rows and the pagination footer always agree.
    async fn fetch_page<S: RecordService>(
        &self,
        service: &S,
        query: &ListQuery,
    ) -> crate::Result<(ListState<S::Record>, Pager)> {
        let mut state = ListState::new();
        let mut query = query.clone();
        for _ in 0..2 {
            let ticket = state.begin_fetch();
            match service.list(&query).await {
                Ok(result) => {
                    state.apply(ticket, result);
                }
                Err(err) => {
                    state.fail(ticket);
                    return Err(err.into());
                }
            }
            let clamped = clamp_page(query.page, total_pages(state.total, query.page_size));
            if clamped == query.page {
                break;
            }
            query = query.at_page(clamped);
        }

        let mut pager = Pager {
            page: query.page,
            page_size: query.page_size,
            total: 0,
        };
        pager.set_total(state.total);
        Ok((state, pager))
    }

    async fn render_user_list(
        &self,
        service: &UserService,
        query: &ListQuery,
    ) -> crate::Result<()> {
        let (state, pager) = self.fetch_page(service, query).await?;
        let display = TableDisplay::new();
        display.print_list(display.render_users(&state.items), &pager);
        Ok(())
    }

    async fn render_product_list(
        &self,
        service: &ProductService,
        query: &ListQuery,
        asset_base: &str,
    ) -> crate::Result<()> {
        let (state, pager) = self.fetch_page(service, query).await?;
        let display = TableDisplay::new();
        display.print_list(display.render_products(&state.items, asset_base), &pager);
        Ok(())
    }

    pub(crate) async fn handle_user_command(&self, command: UserCommands) -> crate::Result<()> {
        let session = self.session()?;
        let service = UserService::new(session.authenticated_client()?);

        match command {
            UserCommands::List {
                search,
                page,
                page_size,
                role_id,
            } => {
                let mut query = ListQuery::new(page, self.page_size(page_size)?);
                if let Some(search) = search {
                    query = query.with_search(search);
                }
                if let Some(role_id) = role_id {
                    query = query.with_filter(ListFilter::Role(role_id));
                }
                self.log_verbose(&format!("Fetching users: {:?}", query));
                self.render_user_list(&service, &query).await
            }
            UserCommands::Show { id } => {
                let user = service.get(id).await?;
                println!("{}", TableDisplay::new().render_users(&[user]));
                Ok(())
            }
            UserCommands::Create {
                name,
                email,
                password,
                cpf,
                phone,
                role_id,
            } => {
                let password = match password {
                    Some(password) => password,
                    None => rpassword::prompt_password("Password for the new user: ").map_err(
                        |e| CliError::InvalidArguments(format!("Failed to read password: {}", e)),
                    )?,
                };

                let mut draft = user_draft(None);
                draft.set("name", &name);
                draft.set("email", &email);
                draft.set(PASSWORD_FIELD, &password);
                draft.set("cpf", cpf.as_deref().unwrap_or(""));
                draft.set("phone", phone.as_deref().unwrap_or(""));
                if let Some(role_id) = role_id {
                    draft.set_extra("role_id", json!(role_id));
                }
                draft.set_extra("active", json!(true));

                let created = service.save(draft.submit()?).await?;
                println!(
                    "Created user '{}' (id {})",
                    created.name,
                    created.id.map_or_else(|| "?".to_string(), |id| id.to_string())
                );
                Ok(())
            }
            UserCommands::Update {
                id,
                name,
                email,
                password,
                cpf,
                phone,
                role_id,
            } => {
                let current = service.get(id).await?;

                let mut draft = user_draft(Some(id));
                draft.set("name", name.as_deref().unwrap_or(&current.name));
                draft.set("email", email.as_deref().unwrap_or(&current.email));
                // Omitted password stays blank and is dropped from the payload
                draft.set(PASSWORD_FIELD, password.as_deref().unwrap_or(""));
                draft.set(
                    "cpf",
                    cpf.as_deref().or(current.cpf.as_deref()).unwrap_or(""),
                );
                draft.set(
                    "phone",
                    phone.as_deref().or(current.phone.as_deref()).unwrap_or(""),
                );
                if let Some(role_id) = role_id.or(current.role_id) {
                    draft.set_extra("role_id", json!(role_id));
                }
                draft.set_extra("active", json!(current.active));

                let updated = service.save(draft.submit()?).await?;
                println!("Updated user '{}'", updated.name);
                Ok(())
            }
            UserCommands::Deactivate { id, yes } => {
                let user = service.get(id).await?;
                let label = user.name.clone();
                self.run_user_toggle(&service, id, user, ToggleAction::Deactivate, yes, &label)
                    .await
            }
            UserCommands::Reactivate { id, yes } => {
                let user = service.get(id).await?;
                let label = user.name.clone();
                self.run_user_toggle(&service, id, user, ToggleAction::Reactivate, yes, &label)
                    .await
            }
        }
    }

    async fn run_user_toggle(
        &self,
        service: &UserService,
        id: u32,
        user: User,
        action: ToggleAction,
        skip_prompt: bool,
        label: &str,
    ) -> crate::Result<()> {
        let mut toggle = StatusToggle::new();
        toggle.request(user, action);

        let verb = match action {
            ToggleAction::Deactivate => "Deactivate",
            ToggleAction::Reactivate => "Reactivate",
        };
        let confirmed =
            skip_prompt || self.confirm_prompt(&format!("{} user '{}'?", verb, label))?;
        if !confirmed {
            toggle.cancel();
            println!("Cancelled");
            return Ok(());
        }

        if let Some((record, action)) = toggle.confirm() {
            let outcome = match action {
                ToggleAction::Deactivate => service.deactivate(id).await,
                ToggleAction::Reactivate => service.reactivate(id, &record).await.map(|_| ()),
            };
            // The list refresh below happens regardless of the outcome;
            // a failure only surfaces as a warning.
            if let Err(err) = outcome {
                eprintln!("Warning: {}", AppError::from(err).display_friendly());
            }
            self.render_user_list(service, &ListQuery::first_page(self.page_size(None)?))
                .await?;
        }
        Ok(())
    }

    pub(crate) async fn handle_product_command(
        &self,
        command: ProductCommands,
    ) -> crate::Result<()> {
        let session = self.session()?;
        let asset_base = session.asset_base().to_string();
        let service = ProductService::new(session.authenticated_client()?);

        match command {
            ProductCommands::List {
                search,
                page,
                page_size,
                category_id,
            } => {
                let mut query = ListQuery::new(page, self.page_size(page_size)?);
                if let Some(search) = search {
                    query = query.with_search(search);
                }
                if let Some(category_id) = category_id {
                    query = query.with_filter(ListFilter::Category(category_id));
                }
                self.log_verbose(&format!("Fetching products: {:?}", query));
                self.render_product_list(&service, &query, &asset_base).await
            }
            ProductCommands::Show { id } => {
                let product = service.get(id).await?;
                println!(
                    "{}",
                    TableDisplay::new().render_products(&[product], &asset_base)
                );
                Ok(())
            }
            ProductCommands::Create {
                name,
                price,
                description,
                category_id,
                image,
            } => {
                validate_price(price)?;

                let mut draft = product_draft(None);
                draft.set("name", &name);
                draft.set("description", description.as_deref().unwrap_or(""));
                draft.set("image", image.as_deref().unwrap_or(""));
                draft.set_extra("price", json!(price));
                if let Some(category_id) = category_id {
                    draft.set_extra("category_id", json!(category_id));
                }
                draft.set_extra("active", json!(true));

                let created = service.save(draft.submit()?).await?;
                println!(
                    "Created product '{}' (id {})",
                    created.name,
                    created.id.map_or_else(|| "?".to_string(), |id| id.to_string())
                );
                Ok(())
            }
            ProductCommands::Update {
                id,
                name,
                price,
                description,
                category_id,
                image,
            } => {
                let current = service.get(id).await?;
                let price = price.unwrap_or(current.price);
                validate_price(price)?;

                let mut draft = product_draft(Some(id));
                draft.set("name", name.as_deref().unwrap_or(&current.name));
                draft.set(
                    "description",
                    description
                        .as_deref()
                        .or(current.description.as_deref())
                        .unwrap_or(""),
                );
                draft.set(
                    "image",
                    image.as_deref().or(current.image.as_deref()).unwrap_or(""),
                );
                draft.set_extra("price", json!(price));
                if let Some(category_id) = category_id.or(current.category_id) {
                    draft.set_extra("category_id", json!(category_id));
                }
                draft.set_extra("active", json!(current.active));

                let updated = service.save(draft.submit()?).await?;
                println!("Updated product '{}'", updated.name);
                Ok(())
            }
            ProductCommands::Deactivate { id, yes } => {
                let product = service.get(id).await?;
                let label = product.name.clone();
                self.run_product_toggle(
                    &service,
                    id,
                    product,
                    ToggleAction::Deactivate,
                    yes,
                    &label,
                    &asset_base,
                )
                .await
            }
            ProductCommands::Reactivate { id, yes } => {
                let product = service.get(id).await?;
                let label = product.name.clone();
                self.run_product_toggle(
                    &service,
                    id,
                    product,
                    ToggleAction::Reactivate,
                    yes,
                    &label,
                    &asset_base,
                )
                .await
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn run_product_toggle(
        &self,
        service: &ProductService,
        id: u32,
        product: Product,
        action: ToggleAction,
        skip_prompt: bool,
        label: &str,
        asset_base: &str,
    ) -> crate::Result<()> {
        let mut toggle = StatusToggle::new();
        toggle.request(product, action);

        let verb = match action {
            ToggleAction::Deactivate => "Deactivate",
            ToggleAction::Reactivate => "Reactivate",
        };
        let confirmed =
            skip_prompt || self.confirm_prompt(&format!("{} product '{}'?", verb, label))?;
        if !confirmed {
            toggle.cancel();
            println!("Cancelled");
            return Ok(());
        }

        if let Some((record, action)) = toggle.confirm() {
            let outcome = match action {
                ToggleAction::Deactivate => service.deactivate(id).await,
                ToggleAction::Reactivate => service.reactivate(id, &record).await.map(|_| ()),
            };
            if let Err(err) = outcome {
                eprintln!("Warning: {}", AppError::from(err).display_friendly());
            }
            self.render_product_list(
                service,
                &ListQuery::first_page(self.page_size(None)?),
                asset_base,
            )
            .await?;
        }
        Ok(())
    }

    pub(crate) async fn handle_company_command(
        &self,
        command: CompanyCommands,
    ) -> crate::Result<()> {
        let session = self.session()?;
        let asset_base = session.asset_base().to_string();
        let service = CompanyService::new(session.authenticated_client()?);

        match command {
            CompanyCommands::Show { id } => {
                let company = service.get(id).await?;
                println!(
                    "{}",
                    TableDisplay::new().render_company(&company, &asset_base)
                );
                Ok(())
            }
            CompanyCommands::Update {
                id,
                name,
                cnpj,
                phone,
                whatsapp,
                address,
                logo,
                theme_color,
                pix,
            } => {
                let current = service.get(id).await?;

                let mut draft = company_draft(id);
                draft.set("name", name.as_deref().unwrap_or(&current.name));
                draft.set(
                    "cnpj",
                    cnpj.as_deref().or(current.cnpj.as_deref()).unwrap_or(""),
                );
                draft.set(
                    "phone",
                    phone.as_deref().or(current.phone.as_deref()).unwrap_or(""),
                );
                draft.set(
                    "whatsapp",
                    whatsapp
                        .as_deref()
                        .or(current.whatsapp.as_deref())
                        .unwrap_or(""),
                );
                draft.set(
                    "address",
                    address
                        .as_deref()
                        .or(current.address.as_deref())
                        .unwrap_or(""),
                );
                draft.set(
                    "logo",
                    logo.as_deref().or(current.logo.as_deref()).unwrap_or(""),
                );
                draft.set(
                    "theme_color",
                    theme_color
                        .as_deref()
                        .or(current.theme_color.as_deref())
                        .unwrap_or(""),
                );

                // Merge the PIX key into the stored blob; a malformed stored
                // value just starts over from the empty default.
                let mut payment_keys = current
                    .payment_keys
                    .as_deref()
                    .map(PaymentKeys::parse)
                    .unwrap_or_default();
                if let Some(pix) = pix {
                    payment_keys.pix = Some(pix);
                }
                draft.set_extra("payment_keys", json!(payment_keys.to_blob()));
                draft.set_extra("active", json!(current.active));

                let updated = service.save(draft.submit()?).await?;
                println!("Updated company '{}'", updated.name);
                Ok(())
            }
        }
    }

    pub(crate) async fn handle_sale_command(&self, command: SaleCommands) -> crate::Result<()> {
        let session = self.session()?;
        let service = SaleService::new(session.authenticated_client()?);

        match command {
            SaleCommands::List { page, page_size } => {
                let query = ListQuery::new(page, self.page_size(page_size)?);
                self.log_verbose(&format!("Fetching sales: {:?}", query));

                let (state, pager) = self.fetch_page(&service, &query).await?;
                let display = TableDisplay::new();
                display.print_list(display.render_sales(&state.items), &pager);
                Ok(())
            }
        }
    }
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::BusinessRule {
            message: "price must be greater than zero".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_price() {
        assert!(validate_price(10.0).is_ok());
        assert!(validate_price(0.0).is_err());
        assert!(validate_price(-1.5).is_err());
        assert!(validate_price(f64::NAN).is_err());
    }

    #[test]
    fn test_user_draft_masks_and_submission() {
        let mut draft = user_draft(None);
        draft.set("name", "Ana");
        draft.set("email", "ana@example.com");
        draft.set(PASSWORD_FIELD, "secret");
        draft.set("cpf", "39053344705");
        assert_eq!(draft.get("cpf"), "390.533.447-05");
        assert!(draft.submit().is_ok());
    }

    #[test]
    fn test_company_draft_requires_full_cnpj() {
        let mut draft = company_draft(1);
        draft.set("name", "Padaria Central");
        draft.set("cnpj", "112223");
        assert!(matches!(
            draft.submit(),
            Err(ValidationError::InvalidField { ref field, .. }) if field == "cnpj"
        ));
    }
}
