//! Service invoice: issuer block, bill-to block, invoice details and a rate table.

use chrono::Duration;
use image::RgbImage;
use rand::Rng;

use super::{GenerationContext, Locale, DATE};
use crate::canvas::{rgb, Color, Rect, BLACK, WHITE};
use crate::layout::{bullet_list, summary_block, Table, MUTED};
use crate::model::{BillTo, CompanyInfo, InvoiceItem, InvoiceOrder, OrderRecord};
use crate::money::{round2, sum_cents};
use crate::pools::{days_before, money_between, pick};

const WIDTH: u32 = 850;
const HEIGHT: u32 = 700;
const TAX_RATE: f64 = 0.1;
const PAYMENT_DAYS: i64 = 30;

const HEADER: Color = rgb(50, 50, 150);

const EN_COMPANY_LINES: &[&str] = &[
    "ACME Corporation",
    "123 Business Ave",
    "Suite 100",
    "New York, NY 10001",
    "Phone: (555) 123-4567",
    "Email: billing@acme.com",
];
const ZH_COMPANY_LINES: &[&str] = &[
    "ACME有限公司",
    "北京市朝阳区商务大道123号",
    "10001室",
    "北京，北京 10001",
    "电话: (010) 123-4567",
    "邮箱: billing@acme.com",
];

const EN_SERVICES: &[&str] = &[
    "Web Development Services",
    "Software License Annual",
    "Cloud Hosting Monthly",
    "Technical Support Hourly",
    "Consulting Services",
    "Data Migration Service",
    "Training Session",
    "Maintenance Contract",
];
const ZH_SERVICES: &[&str] = &[
    "网站开发服务",
    "软件年度许可",
    "云托管月费",
    "技术支持小时费",
    "咨询服务",
    "数据迁移服务",
    "培训课程",
    "维护合同",
];

const EN_CITIES: &[&str] = &["San Francisco", "Seattle", "Boston", "Miami", "Denver"];
const EN_STATES: &[&str] = &["CA", "WA", "MA", "FL", "CO"];
const EN_FIRST_NAMES: &[&str] = &["John", "Jane", "Robert", "Emily", "Michael"];
const EN_SURNAMES: &[&str] = &["Smith", "Johnson", "Williams", "Brown", "Davis"];
const ZH_CITIES: &[&str] = &["上海", "深圳", "广州", "杭州", "成都"];
const ZH_PROVINCES: &[&str] = &["上海", "广东", "浙江", "四川"];
const ZH_SURNAMES: &[&str] = &["张", "李", "王", "刘", "陈"];
const ZH_TITLES: &[&str] = &["先生", "女士", "经理"];

fn company(locale: Locale) -> CompanyInfo {
    match locale {
        Locale::English => CompanyInfo {
            name: "ACME Corporation".into(),
            address: "123 Business Ave, Suite 100, New York, NY 10001".into(),
            phone: "(555) 123-4567".into(),
            email: "billing@acme.com".into(),
        },
        Locale::Chinese => CompanyInfo {
            name: "ACME有限公司".into(),
            address: "北京市朝阳区商务大道123号10001室，北京，北京 10001".into(),
            phone: "(010) 123-4567".into(),
            email: "billing@acme.com".into(),
        },
    }
}

pub fn generate(order_id: &str, ctx: &mut GenerationContext) -> (RgbImage, OrderRecord) {
    let locale = ctx.locale;
    let rng = &mut ctx.rng;

    let invoice_date = days_before(ctx.now, rng, 1..=30).format(DATE).to_string();
    let due_date = (ctx.now + Duration::days(PAYMENT_DAYS)).format(DATE).to_string();
    let terms = locale.text("Net 30 Days", "30天内付款").to_owned();
    let po_number = format!(
        "{}-{}",
        locale.text("PO", "采购单"),
        rng.gen_range(10000..=99999)
    );

    let client_no = rng.gen_range(1000..=9999);
    let street_no = rng.gen_range(100..=9999);
    let (client_name, address_line, city_line, contact_person, client_email) = match locale {
        Locale::English => (
            format!("Client {client_no}"),
            format!("{street_no} Client Rd"),
            format!(
                "{}, {} {}",
                pick(rng, EN_CITIES),
                pick(rng, EN_STATES),
                rng.gen_range(10001..=99999)
            ),
            format!("{} {}", pick(rng, EN_FIRST_NAMES), pick(rng, EN_SURNAMES)),
            format!("client{}@client.com", rng.gen_range(1000..=9999)),
        ),
        Locale::Chinese => (
            format!("客户{client_no}"),
            format!("{street_no} 客户路"),
            format!(
                "{}，{} {}",
                pick(rng, ZH_CITIES),
                pick(rng, ZH_PROVINCES),
                rng.gen_range(10001..=99999)
            ),
            format!("{}{}", pick(rng, ZH_SURNAMES), pick(rng, ZH_TITLES)),
            format!("kehu{}@kehu.com", rng.gen_range(1000..=9999)),
        ),
    };

    let services = locale.select(EN_SERVICES, ZH_SERVICES);
    let items: Vec<InvoiceItem> = (1..=rng.gen_range(3..=6))
        .map(|number| {
            let description = pick(rng, services).to_string();
            let rate = money_between(rng, 50.0, 500.0);
            let quantity = rng.gen_range(1..=10);
            InvoiceItem {
                number: number.to_string(),
                description,
                rate,
                quantity,
                amount: round2(rate * f64::from(quantity)),
            }
        })
        .collect();

    let subtotal = sum_cents(items.iter().map(|item| item.amount));
    let tax_amount = round2(subtotal * TAX_RATE);
    let grand_total = sum_cents([subtotal, tax_amount]);

    let currency = locale.currency();
    let width = WIDTH as i32;
    let mut canvas = ctx.canvas(WIDTH, HEIGHT);

    canvas.rect(Rect::band(WIDTH, 0, 80), Some(HEADER), Some(HEADER), 1);
    canvas.text(50, 20, locale.text("INVOICE", "发 票"), 30.0, WHITE);
    canvas.text(
        width - 200,
        25,
        &format!("{} {order_id}", locale.text("Invoice #:", "发票号码:")),
        16.0,
        WHITE,
    );

    let mut y = bullet_list(
        &mut canvas,
        50,
        100,
        25,
        16.0,
        BLACK,
        locale.select(EN_COMPANY_LINES, ZH_COMPANY_LINES),
    );

    y += 20;
    canvas.text(500, y, locale.text("BILL TO:", "开票给:"), 18.0, BLACK);
    y += 25;
    let bill_to_lines = [
        client_name.clone(),
        address_line.clone(),
        city_line.clone(),
        format!("{} {contact_person}", locale.text("Contact:", "联系人:")),
        format!("{} {client_email}", locale.text("Email:", "邮箱:")),
    ];
    y = bullet_list(&mut canvas, 500, y, 20, 16.0, BLACK, &bill_to_lines);

    y += 30;
    let details = [
        (locale.text("Invoice Date:", "发票日期:"), invoice_date.as_str()),
        (locale.text("Due Date:", "到期日期:"), due_date.as_str()),
        (locale.text("Terms:", "付款条件:"), terms.as_str()),
        (locale.text("PO Number:", "采购单号:"), po_number.as_str()),
    ];
    y = summary_block(&mut canvas, (500, 650), y, 25, 16.0, BLACK, &details);

    y += 30;
    let table = Table::new(50, width - 50, 65, &[50, 300, 120, 100])
        .with_header(35, rgb(240, 240, 240), rgb(30, 30, 30))
        .with_header_outline(MUTED)
        .with_header_size(18.0)
        .with_row_height(35)
        .with_stripes(rgb(250, 250, 250), WHITE)
        .with_border(Some(rgb(200, 200, 200)))
        .with_text(BLACK, 16.0)
        .with_column_size(1, 14.0);
    y = table.draw_header(
        &mut canvas,
        y,
        &[
            locale.text("#", "编号"),
            locale.text("Description", "描述"),
            locale.text("Rate ($)", "单价(元)"),
            locale.text("Qty", "数量"),
            locale.text("Amount ($)", "金额(元)"),
        ],
    );
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                item.number.clone(),
                item.description.clone(),
                format!("{:.2}", item.rate),
                item.quantity.to_string(),
                format!("{:.2}", item.amount),
            ]
        })
        .collect();
    y = table.draw_rows(&mut canvas, y, &rows) + 30;

    let subtotals = [
        (locale.text("Subtotal:", "小计:").to_owned(), currency.amount(subtotal)),
        (
            format!(
                "{}({}%):",
                locale.text("Tax ", "税费"),
                (TAX_RATE * 100.0).round()
            ),
            currency.amount(tax_amount),
        ),
    ];
    y = summary_block(&mut canvas, (width - 200, width - 100), y, 30, 16.0, BLACK, &subtotals);

    y += 10;
    canvas.text(width - 200, y, locale.text("TOTAL:", "合 计:"), 24.0, BLACK);
    canvas.text(width - 100, y, &currency.amount(grand_total), 24.0, BLACK);

    y += 60;
    let payment_notes: [&str; 2] = match locale {
        Locale::English => [
            "Payment Terms: Net 30 days. Late payments subject to 1.5% monthly service charge.",
            "Make checks payable to ACME Corporation. Questions? Call (555) 123-4567.",
        ],
        Locale::Chinese => [
            "付款条款: 30天内付款。逾期付款每月收取1.5%的服务费。",
            "支票请付给ACME有限公司。如有疑问？致电(010) 123-4567。",
        ],
    };
    bullet_list(&mut canvas, 50, y, 25, 14.0, MUTED, &payment_notes);

    let record = InvoiceOrder {
        invoice_id: order_id.to_owned(),
        invoice_date,
        due_date,
        terms,
        po_number,
        company_info: company(locale),
        bill_to: BillTo {
            name: client_name,
            address: format!("{address_line}, {city_line}"),
            contact_person,
            email: client_email,
        },
        items,
        subtotal,
        tax_rate: TAX_RATE,
        tax_amount,
        grand_total,
    };

    (canvas.finish(), OrderRecord::Invoice(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::{clock, context};

    fn record(seed: u64, locale: Locale) -> InvoiceOrder {
        match generate("ORD0003", &mut context(seed, locale)).1 {
            OrderRecord::Invoice(record) => record,
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn totals_and_dates() {
        for seed in 0..20 {
            let invoice = record(seed, Locale::English);
            assert!((3..=6).contains(&invoice.items.len()));
            assert_eq!(invoice.tax_rate, 0.1);
            assert_eq!(invoice.tax_amount, round2(invoice.subtotal * 0.1));
            assert_eq!(invoice.grand_total, sum_cents([invoice.subtotal, invoice.tax_amount]));
            assert_eq!(invoice.due_date, "2026-02-25");
            assert_eq!(invoice.terms, "Net 30 Days");
            assert!(invoice.po_number.starts_with("PO-"));
            for item in &invoice.items {
                assert!(EN_SERVICES.contains(&item.description.as_str()));
                assert!((1..=10).contains(&item.quantity));
                assert!((50.0..=500.0).contains(&item.rate));
            }
        }
        assert_eq!(clock().format(DATE).to_string(), "2026-01-26");
    }

    #[test]
    fn chinese_invoice_uses_local_company() {
        let invoice = record(2, Locale::Chinese);
        assert_eq!(invoice.company_info.name, "ACME有限公司");
        assert_eq!(invoice.terms, "30天内付款");
        assert!(invoice.po_number.starts_with("采购单-"));
        assert!(invoice.bill_to.name.starts_with("客户"));
        assert!(invoice.bill_to.address.contains("客户路"));
    }

    #[test]
    fn bill_to_address_joins_both_lines() {
        let invoice = record(9, Locale::English);
        assert!(invoice.bill_to.address.contains(" Client Rd, "));
        assert!(invoice.bill_to.email.ends_with("@client.com"));
    }
}
