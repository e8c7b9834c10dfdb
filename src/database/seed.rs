// ABOUTME: Idempotent boot-time seeding of one coherent sample data graph
// ABOUTME: A populated properties table makes the whole routine a no-op

use super::Database;
use crate::models::{
    AddressPayload, CreateAccountRequest, CreateAssociationRequest, CreateBoardMemberRequest,
    CreateNamedTypeRequest, CreateOwnerRequest, CreatePaymentRequest, CreatePlanRequest,
    CreatePortfolioRequest, CreatePropertyRequest, CreateSubscriptionRequest,
    CreateTenantRequest, CreateTicketRequest, CreateTransactionRequest, CreateUnitRequest,
    PhotoPayload,
};
use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

impl Database {
    /// Seed sample data when the database is empty.
    ///
    /// Returns `true` when data was inserted and `false` when the
    /// properties table was already populated.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails.
    pub async fn seed_sample_data(&self) -> Result<bool> {
        let property_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM properties")
            .fetch_one(&self.pool)
            .await?;

        if property_count > 0 {
            info!(properties = property_count, "seed skipped, database already populated");
            return Ok(false);
        }

        let property = self
            .create_property(&CreatePropertyRequest {
                name: "Maple Court".to_string(),
                property_type: "multi_family".to_string(),
                status: "active".to_string(),
                value: 1_250_000.0,
                addresses: Some(vec![AddressPayload {
                    id: None,
                    street: "412 Maple Ave".to_string(),
                    city: "Springfield".to_string(),
                    state: "IL".to_string(),
                    postal_code: "62704".to_string(),
                }]),
                photos: Some(vec![PhotoPayload {
                    id: None,
                    url: "https://photos.example.com/maple-court/front.jpg".to_string(),
                    name: "Front elevation".to_string(),
                }]),
            })
            .await?;

        let addresses = self
            .list_addresses(property.id)
            .await?
            .unwrap_or_default();
        let address = addresses
            .first()
            .ok_or_else(|| anyhow::anyhow!("seed property has no address"))?;

        let unit = self
            .create_unit(&CreateUnitRequest {
                address_id: address.id,
                unit_number: "1A".to_string(),
                rent: 1450.0,
                status: "occupied".to_string(),
            })
            .await?;

        let tenant = self
            .create_tenant(&CreateTenantRequest {
                unit_id: unit.id,
                first_name: "Dana".to_string(),
                last_name: "Whitfield".to_string(),
                email: "dana.whitfield@example.com".to_string(),
                phone: Some("217-555-0147".to_string()),
                lease_start: NaiveDate::from_ymd_opt(2025, 3, 1),
                lease_end: NaiveDate::from_ymd_opt(2026, 2, 28),
                rent: 1450.0,
            })
            .await?;

        self.create_payment(&CreatePaymentRequest {
            tenant_id: tenant.id,
            amount: 1450.0,
            payment_date: NaiveDate::from_ymd_opt(2025, 7, 1)
                .ok_or_else(|| anyhow::anyhow!("invalid seed payment date"))?,
            status: "settled".to_string(),
        })
        .await?;

        self.create_owner(&CreateOwnerRequest {
            property_id: property.id,
            first_name: "Ellis".to_string(),
            last_name: "Navarro".to_string(),
            email: "ellis.navarro@example.com".to_string(),
            phone: None,
        })
        .await?;

        let association = self
            .create_association(&CreateAssociationRequest {
                property_id: property.id,
                name: "Maple Court HOA".to_string(),
                contact_email: "board@maplecourt.example.com".to_string(),
                phone: None,
                monthly_fee: 85.0,
            })
            .await?;

        self.create_board_member(&CreateBoardMemberRequest {
            association_id: association.id,
            name: "Priya Raman".to_string(),
            role: "president".to_string(),
            email: Some("priya.raman@example.com".to_string()),
            phone: None,
        })
        .await?;

        let operating_type = self
            .create_account_type(&CreateNamedTypeRequest {
                name: "Operating".to_string(),
            })
            .await?;

        let account = self
            .create_account(&CreateAccountRequest {
                account_type_id: operating_type.id,
                name: "Maple Court Operating".to_string(),
            })
            .await?;

        let rent_type = self
            .create_transaction_type(&CreateNamedTypeRequest {
                name: "Rent".to_string(),
            })
            .await?;

        self.create_transaction(&CreateTransactionRequest {
            account_id: account.id,
            property_id: property.id,
            transaction_type_id: Some(rent_type.id),
            amount: 1450.0,
            memo: Some("July rent, unit 1A".to_string()),
            transaction_date: NaiveDate::from_ymd_opt(2025, 7, 1)
                .ok_or_else(|| anyhow::anyhow!("invalid seed transaction date"))?,
        })
        .await?;

        self.create_ticket(&CreateTicketRequest {
            unit_id: unit.id,
            title: "Leaking kitchen faucet".to_string(),
            description: Some("Slow drip under the sink".to_string()),
        })
        .await?;

        let plan = self
            .create_plan(&CreatePlanRequest {
                name: "Starter".to_string(),
                price: 19.0,
                billing_interval: "monthly".to_string(),
            })
            .await?;

        self.create_subscription(&CreateSubscriptionRequest {
            plan_id: plan.id,
            customer_email: "ellis.navarro@example.com".to_string(),
        })
        .await?;

        self.create_portfolio(&CreatePortfolioRequest {
            name: "Springfield Holdings".to_string(),
            customer_email: Some("ellis.navarro@example.com".to_string()),
            property_ids: Some(vec![property.id]),
        })
        .await?;

        info!("seeded sample data");
        Ok(true)
    }
}
