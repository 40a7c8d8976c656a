//! Plain receipt: a centered title, six info lines and three product lines.

use image::RgbImage;
use rand::Rng;

use super::{GenerationContext, Locale, DATE_TIME};
use crate::canvas::BLACK;
use crate::layout::{centered_title, FieldList};
use crate::model::{LineItem, OrderRecord, SimpleOrder};
use crate::money::{round2, sum_cents};
use crate::pools::{days_before, money_between};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

/// Product families with their quantity and price ranges.
const PRODUCT_LINES: [(&str, &str, (u32, u32), (f64, f64)); 3] = [
    ("Product", "商品", (1, 5), (10.0, 500.0)),
    ("Item", "物品", (1, 3), (5.0, 200.0)),
    ("Good", "货物", (2, 10), (15.0, 300.0)),
];

pub fn generate(order_id: &str, ctx: &mut GenerationContext) -> (RgbImage, OrderRecord) {
    let locale = ctx.locale;
    let rng = &mut ctx.rng;

    let date = days_before(ctx.now, rng, 1..=30).format(DATE_TIME).to_string();
    let customer_no = rng.gen_range(1000..=9999);
    let email_no = rng.gen_range(1000..=9999);
    let (customer, email, phone, address) = match locale {
        Locale::English => (
            format!("Customer {customer_no}"),
            format!("customer{email_no}@email.com"),
            format!(
                "+1-{}-{}-{}",
                rng.gen_range(100..=999),
                rng.gen_range(100..=999),
                rng.gen_range(1000..=9999)
            ),
            format!(
                "{} Main St, City {}, State",
                rng.gen_range(100..=9999),
                rng.gen_range(1..=100)
            ),
        ),
        Locale::Chinese => (
            format!("客户{customer_no}"),
            format!("kehu{email_no}@email.com"),
            format!("138-{}-{}", rng.gen_range(1000..=9999), rng.gen_range(1000..=9999)),
            format!(
                "{} 号大街，{}号城市，省份",
                rng.gen_range(100..=9999),
                rng.gen_range(1..=100)
            ),
        ),
    };

    let products: Vec<LineItem> = PRODUCT_LINES
        .iter()
        .map(|(english, chinese, (min_qty, max_qty), (low, high))| {
            let number = rng.gen_range(100..=999);
            let quantity = rng.gen_range(*min_qty..=*max_qty);
            let unit_price = money_between(rng, *low, *high);
            let name = match locale {
                Locale::English => format!("{english} {number}"),
                Locale::Chinese => format!("{chinese}{number}"),
            };
            LineItem {
                name,
                quantity,
                unit_price,
                subtotal: round2(f64::from(quantity) * unit_price),
            }
        })
        .collect();
    let total = sum_cents(products.iter().map(|p| p.subtotal));

    let currency = locale.currency();
    let mut canvas = ctx.canvas(WIDTH, HEIGHT);
    centered_title(
        &mut canvas,
        20,
        &format!("{} #{order_id}", locale.text("ORDER", "订单")),
        24.0,
        BLACK,
    );

    let info = [
        (locale.text("Order ID:", "订单编号:"), order_id),
        (locale.text("Date:", "日期:"), date.as_str()),
        (locale.text("Customer:", "客户:"), customer.as_str()),
        (locale.text("Email:", "邮箱:"), email.as_str()),
        (locale.text("Phone:", "电话:"), phone.as_str()),
        (locale.text("Address:", "地址:"), address.as_str()),
    ];
    let mut y = FieldList::new(50, 200, 30)
        .with_colors(BLACK, BLACK)
        .draw(&mut canvas, 80, &info);

    y += 20;
    canvas.text(50, y, locale.text("PRODUCTS:", "商品:"), 18.0, BLACK);
    y += 30;

    for product in &products {
        canvas.text(50, y, &format!("- {}", product.name), 16.0, BLACK);
        canvas.text(
            300,
            y,
            &format!("{} {}", locale.text("Qty:", "数量:"), product.quantity),
            16.0,
            BLACK,
        );
        canvas.text(400, y, &currency.amount(product.unit_price), 16.0, BLACK);
        canvas.text(500, y, &currency.amount(product.subtotal), 16.0, BLACK);
        y += 25;
    }

    y += 20;
    canvas.text(400, y, locale.text("TOTAL:", "总计:"), 18.0, BLACK);
    canvas.text(500, y, &currency.amount(total), 18.0, BLACK);

    let record = SimpleOrder {
        order_id: order_id.to_owned(),
        date,
        customer,
        email,
        phone,
        address,
        products,
        total,
    };

    (canvas.finish(), OrderRecord::Simple(record))
}
