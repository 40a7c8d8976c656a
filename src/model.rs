//! Sidecar records written next to each rendered page.
//!
//! Field order matters: `serde_json` emits struct fields in declaration order and consumers
//! diff the sidecars against reference files.

use serde::{Deserialize, Serialize};

use crate::money::sum_cents;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleOrder {
    pub order_id: String,
    pub date: String,
    pub customer: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub products: Vec<LineItem>,
    pub total: f64,
}

/// Numbered product row used by the detailed and sample layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberedProduct {
    pub item_no: String,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedOrder {
    pub order_id: String,
    pub customer_name: String,
    pub phone: String,
    pub shipping_address: String,
    pub order_date: String,
    pub shipping_method: String,
    pub payment_method: String,
    pub status: String,
    pub products: Vec<NumberedProduct>,
    pub subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub grand_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillTo {
    pub name: String,
    pub address: String,
    pub contact_person: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub number: String,
    pub description: String,
    pub rate: f64,
    pub quantity: u32,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceOrder {
    pub invoice_id: String,
    pub invoice_date: String,
    pub due_date: String,
    pub terms: String,
    pub po_number: String,
    pub company_info: CompanyInfo,
    pub bill_to: BillTo,
    pub items: Vec<InvoiceItem>,
    pub subtotal: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub grand_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CondensedOrder {
    pub order_id: String,
    pub date: String,
    pub customer_id: String,
    pub status: String,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModernCustomer {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state_zip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModernItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModernOrder {
    pub order_id: String,
    pub order_date: String,
    pub status: String,
    pub estimated_delivery: String,
    pub customer_info: ModernCustomer,
    pub items: Vec<ModernItem>,
    pub subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcommerceItem {
    pub name: String,
    pub specification: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub original_subtotal: f64,
    pub discount: f64,
    pub final_subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcommerceOrder {
    pub order_id: String,
    pub order_date: String,
    pub customer_name: String,
    pub phone: String,
    pub shipping_address: String,
    pub shipping_method: String,
    pub payment_method: String,
    pub status: String,
    pub promotions: Vec<String>,
    pub items: Vec<EcommerceItem>,
    pub original_total: f64,
    pub discount_total: f64,
    pub final_total: f64,
    pub points_used: u32,
    pub points_deduction: f64,
    pub shipping_cost: f64,
    pub tax: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct B2bCompany {
    pub name: String,
    pub contact_person: String,
    pub address: String,
    pub city: String,
    pub tax_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct B2bItem {
    pub index: String,
    pub name: String,
    pub model: String,
    pub unit: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub amount: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct B2bOrder {
    pub order_id: String,
    pub contract_number: String,
    pub po_number: String,
    pub order_date: String,
    pub delivery_date: String,
    pub payment_terms: String,
    pub credit_limit: f64,
    pub credit_used: f64,
    pub company_info: B2bCompany,
    pub items: Vec<B2bItem>,
    pub subtotal: f64,
    pub discount: f64,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternationalCustomer {
    pub name: String,
    pub address: String,
    /// Empty unless the destination requires one.
    pub vat_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternationalItem {
    pub index: String,
    pub name: String,
    pub hs_code: String,
    pub origin_country: String,
    pub unit_price_usd: f64,
    pub quantity: u32,
    pub total_price_usd: f64,
    pub tariff_code: String,
    pub tariff_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternationalOrder {
    pub order_id: String,
    pub tracking_number: String,
    pub shipping_carrier: String,
    pub order_date: String,
    pub origin_country: String,
    pub destination_country: String,
    pub currency: String,
    pub exchange_rate: f64,
    pub customer_info: InternationalCustomer,
    pub items: Vec<InternationalItem>,
    pub subtotal_usd: f64,
    pub tax_usd: f64,
    pub shipping_usd: f64,
    pub duty_usd: f64,
    pub total_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixedCustomer {
    pub name: String,
    /// Empty for private customers.
    pub company: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub is_international: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixedItem {
    pub index: String,
    pub name: String,
    pub specification: String,
    pub brand: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub original_subtotal: f64,
    pub discount: f64,
    pub after_discount_subtotal: f64,
    pub tax_rate: f64,
    pub tax_amount: f64,
    pub final_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixedOrder {
    pub order_id: String,
    pub order_type: String,
    pub priority: String,
    pub order_date: String,
    pub payment_status: String,
    pub fulfillment_status: String,
    pub customer_info: MixedCustomer,
    pub promotions: Vec<String>,
    pub items: Vec<MixedItem>,
    pub original_total: f64,
    pub discount_total: f64,
    pub tax_total: f64,
    pub shipping_total: f64,
    /// Shipping, handling and insurance combined.
    pub other_fees: f64,
    pub final_total: f64,
    pub handling_fee: f64,
    pub insurance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizedCustomer {
    pub name: String,
    pub company: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
}

/// Selected customization options, keyed by their printed Chinese labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationDetails {
    #[serde(rename = "产品类型")]
    pub product_type: String,
    #[serde(rename = "主要材质")]
    pub material: String,
    #[serde(rename = "颜色方案")]
    pub color_scheme: String,
    #[serde(rename = "尺寸规格")]
    pub dimensions: String,
    #[serde(rename = "工艺要求")]
    pub finish: String,
    #[serde(rename = "功能特性")]
    pub feature: String,
    #[serde(rename = "包装要求")]
    pub packaging: String,
    #[serde(rename = "附加服务")]
    pub extra_service: String,
}

impl CustomizationDetails {
    /// Label/value pairs in printing order.
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("产品类型", self.product_type.as_str()),
            ("主要材质", self.material.as_str()),
            ("颜色方案", self.color_scheme.as_str()),
            ("尺寸规格", self.dimensions.as_str()),
            ("工艺要求", self.finish.as_str()),
            ("功能特性", self.feature.as_str()),
            ("包装要求", self.packaging.as_str()),
            ("附加服务", self.extra_service.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStage {
    pub stage: String,
    pub status: String,
    pub expected_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityCheck {
    pub standard: String,
    pub description: String,
    /// `None` until production has reached inspection.
    pub passed: Option<bool>,
}

/// The customized product itself, priced before shipping and tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizedItem {
    pub name: String,
    pub specification: String,
    pub quantity: u32,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizedOrder {
    pub order_id: String,
    pub order_type: String,
    pub customization_level: String,
    pub order_date: String,
    pub production_status: String,
    pub delivery_method: String,
    pub customer_info: CustomizedCustomer,
    pub customization_details: CustomizationDetails,
    pub production_schedule: Vec<ScheduleStage>,
    pub quality_checks: Vec<QualityCheck>,
    pub items: Vec<CustomizedItem>,
    pub design_cost: f64,
    pub material_cost: f64,
    pub production_cost: f64,
    pub total_cost: f64,
    pub packaging_cost: f64,
    pub shipping_cost: f64,
    pub tax: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleOrder {
    pub order_no: String,
    pub customer_name: String,
    pub phone: String,
    pub delivery_address: String,
    pub order_date: String,
    pub shipping_method: String,
    pub payment_method: String,
    pub status: String,
    pub products: Vec<NumberedProduct>,
    pub items_total: f64,
    pub shipping_fee: f64,
    pub order_total: f64,
}

/// Any record this crate produces. Serializes as the inner record object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OrderRecord {
    Simple(SimpleOrder),
    Detailed(DetailedOrder),
    Invoice(InvoiceOrder),
    Condensed(CondensedOrder),
    Modern(ModernOrder),
    Ecommerce(EcommerceOrder),
    B2b(B2bOrder),
    International(InternationalOrder),
    Mixed(MixedOrder),
    Customized(CustomizedOrder),
    Sample(SampleOrder),
}

impl OrderRecord {
    pub fn order_id(&self) -> &str {
        match self {
            Self::Simple(r) => &r.order_id,
            Self::Detailed(r) => &r.order_id,
            Self::Invoice(r) => &r.invoice_id,
            Self::Condensed(r) => &r.order_id,
            Self::Modern(r) => &r.order_id,
            Self::Ecommerce(r) => &r.order_id,
            Self::B2b(r) => &r.order_id,
            Self::International(r) => &r.order_id,
            Self::Mixed(r) => &r.order_id,
            Self::Customized(r) => &r.order_id,
            Self::Sample(r) => &r.order_no,
        }
    }

    /// The grand total as stored in the record.
    pub fn total(&self) -> f64 {
        match self {
            Self::Simple(r) => r.total,
            Self::Detailed(r) => r.grand_total,
            Self::Invoice(r) => r.grand_total,
            Self::Condensed(r) => r.total,
            Self::Modern(r) => r.total,
            Self::Ecommerce(r) => r.final_total,
            Self::B2b(r) => r.total,
            Self::International(r) => r.total_usd,
            Self::Mixed(r) => r.final_total,
            Self::Customized(r) => r.total_cost,
            Self::Sample(r) => r.order_total,
        }
    }

    /// The grand total rebuilt from the line items and fees.
    pub fn recomputed_total(&self) -> f64 {
        match self {
            Self::Simple(r) => sum_cents(r.products.iter().map(|p| p.subtotal)),
            Self::Detailed(r) => {
                sum_cents(r.products.iter().map(|p| p.subtotal).chain([r.shipping, r.tax]))
            }
            Self::Invoice(r) => sum_cents(r.items.iter().map(|i| i.amount).chain([r.tax_amount])),
            Self::Condensed(r) => {
                sum_cents(r.items.iter().map(|i| i.subtotal).chain([r.shipping, r.tax]))
            }
            Self::Modern(r) => sum_cents(r.items.iter().map(|i| i.total).chain([r.shipping, r.tax])),
            Self::Ecommerce(r) => sum_cents(
                r.items
                    .iter()
                    .map(|i| i.final_subtotal)
                    .chain([r.shipping_cost, r.tax, -r.points_deduction]),
            ),
            Self::B2b(r) => sum_cents(
                r.items
                    .iter()
                    .map(|i| i.amount + i.tax_amount)
                    .chain([r.shipping, -r.discount]),
            ),
            Self::International(r) => sum_cents(
                r.items
                    .iter()
                    .map(|i| i.total_price_usd)
                    .chain([r.tax_usd, r.shipping_usd, r.duty_usd]),
            ),
            Self::Mixed(r) => sum_cents(
                r.items
                    .iter()
                    .map(|i| i.after_discount_subtotal + i.tax_amount)
                    .chain([r.shipping_total, r.handling_fee, r.insurance]),
            ),
            Self::Customized(r) => {
                sum_cents(r.items.iter().map(|i| i.amount).chain([r.shipping_cost, r.tax]))
            }
            Self::Sample(r) => sum_cents(r.products.iter().map(|p| p.subtotal).chain([r.shipping_fee])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple() -> SimpleOrder {
        SimpleOrder {
            order_id: "ORD0001".into(),
            date: "2026-01-20 09:00:00".into(),
            customer: "Customer 1234".into(),
            email: "customer1234@email.com".into(),
            phone: "+1-555-123-4567".into(),
            address: "42 Main St, City 3, State".into(),
            products: vec![LineItem {
                name: "Product 101".into(),
                quantity: 2,
                unit_price: 10.25,
                subtotal: 20.5,
            }],
            total: 20.5,
        }
    }

    #[test]
    fn keys_follow_declaration_order() {
        let json = serde_json::to_string(&OrderRecord::Simple(simple())).expect("serialize");
        let keys = [
            "\"order_id\"",
            "\"date\"",
            "\"customer\"",
            "\"email\"",
            "\"phone\"",
            "\"address\"",
            "\"products\"",
            "\"total\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|key| json.find(key).expect("key present")).collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn untagged_record_has_no_wrapper() {
        let value = serde_json::to_value(OrderRecord::Simple(simple())).expect("serialize");
        assert_eq!(value["order_id"], "ORD0001");
        assert_eq!(value["products"][0]["quantity"], 2);
    }

    #[test]
    fn customization_details_use_chinese_keys() {
        let details = CustomizationDetails {
            product_type: "高端手表".into(),
            material: "纯银".into(),
            color_scheme: "玫瑰金".into(),
            dimensions: "20mm × 30mm × 5mm".into(),
            finish: "抛光".into(),
            feature: "防水".into(),
            packaging: "精美礼盒".into(),
            extra_service: "刻字".into(),
        };
        let value = serde_json::to_value(&details).expect("serialize");
        assert_eq!(value["产品类型"], "高端手表");
        assert_eq!(value["附加服务"], "刻字");
        assert_eq!(details.entries()[3], ("尺寸规格", "20mm × 30mm × 5mm"));
    }

    #[test]
    fn unreached_quality_check_serializes_null() {
        let check = QualityCheck {
            standard: "外观检查".into(),
            description: "表面光滑无瑕疵".into(),
            passed: None,
        };
        let value = serde_json::to_value(check).expect("serialize");
        assert!(value["passed"].is_null());
    }

    #[test]
    fn recomputed_total_matches_simple_record() {
        let record = OrderRecord::Simple(simple());
        assert_eq!(record.total(), record.recomputed_total());
        assert_eq!(record.order_id(), "ORD0001");
    }
}
