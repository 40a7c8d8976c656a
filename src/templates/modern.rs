//! Order confirmation in a card-style layout with a fixed product catalogue.

use chrono::Duration;
use image::RgbImage;
use rand::Rng;

use super::{GenerationContext, Locale};
use crate::canvas::{rgb, Color, Rect, WHITE};
use crate::layout::{bullet_list, summary_block, Table, HEADING, INK, MUTED, STRIPE_LIGHT};
use crate::model::{ModernCustomer, ModernItem, ModernOrder, OrderRecord};
use crate::money::{round2, sum_cents};
use crate::pools::{days_after, days_before, pick};

const WIDTH: u32 = 950;
const HEIGHT: u32 = 750;
const TAX_RATE: f64 = 0.08;
const SHIPPING: f64 = 15.99;

const ACCENT: Color = rgb(41, 128, 185);
const SUBTLE: Color = rgb(108, 117, 125);
const FRAME: Color = rgb(200, 200, 200);

/// English name, Chinese name, unit price and quantity.
const CATALOGUE: [(&str, &str, f64, u32); 4] = [
    ("Premium Wireless Headphones", "高端无线耳机", 249.99, 1),
    ("Ultra Slim Laptop Sleeve", "超薄笔记本电脑套", 39.99, 2),
    ("Bluetooth Portable Speaker", "蓝牙便携音箱", 89.99, 1),
    ("Ergonomic Office Chair", "人体工学办公椅", 199.99, 1),
];

const EN_STATUS: &[&str] = &["Confirmed", "Processing", "Shipped", "Out for Delivery", "Delivered"];
const ZH_STATUS: &[&str] = &["已确认", "处理中", "已发货", "配送中", "已签收"];
const EN_FIRST_NAMES: &[&str] = &["James", "Mary", "John", "Patricia", "Robert", "Jennifer"];
const EN_SURNAMES: &[&str] = &["Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia"];
const ZH_SURNAMES: &[&str] = &["张", "李", "王", "刘", "陈", "杨"];
const ZH_TITLES: &[&str] = &["先生", "女士", "经理"];
const EN_STREETS: &[&str] = &["Oak", "Pine", "Maple", "Cedar", "Elm"];
const EN_STREET_KINDS: &[&str] = &["St", "Ave", "Rd", "Blvd"];
const ZH_STREETS: &[&str] = &["橡树", "松树", "枫树", "雪松", "榆树"];
const ZH_STREET_KINDS: &[&str] = &["街", "大道", "路", "林荫道"];
const EN_CITIES: &[&str] = &["New York", "Los Angeles", "Chicago", "Houston", "Phoenix", "Philadelphia"];
const ZH_CITIES: &[&str] = &["北京", "上海", "广州", "深圳", "杭州", "成都"];
const EN_STATES: &[&str] = &["NY", "CA", "IL", "TX", "AZ", "PA"];
const ZH_STATES: &[&str] = &["北京", "上海", "广东", "深圳", "浙江", "四川"];

fn date_format(locale: Locale) -> &'static str {
    locale.text("%B %d, %Y", "%Y年%m月%d日")
}

pub fn generate(order_id: &str, ctx: &mut GenerationContext) -> (RgbImage, OrderRecord) {
    let locale = ctx.locale;
    let rng = &mut ctx.rng;

    let order_date = days_before(ctx.now, rng, 1..=30)
        .format(date_format(locale))
        .to_string();
    let status = pick(rng, locale.select(EN_STATUS, ZH_STATUS)).to_string();
    let estimated_delivery = days_after(ctx.now, rng, 2..=7)
        .format(date_format(locale))
        .to_string();

    let house_no = rng.gen_range(100..=9999);
    let customer = match locale {
        Locale::English => ModernCustomer {
            name: format!("{} {}", pick(rng, EN_FIRST_NAMES), pick(rng, EN_SURNAMES)),
            address: format!(
                "{house_no} {} {}",
                pick(rng, EN_STREETS),
                pick(rng, EN_STREET_KINDS)
            ),
            city: pick(rng, EN_CITIES).to_string(),
            state_zip: format!("{} {}", pick(rng, EN_STATES), rng.gen_range(10001..=99999)),
        },
        Locale::Chinese => ModernCustomer {
            name: format!("{}{}", pick(rng, ZH_SURNAMES), pick(rng, ZH_TITLES)),
            address: format!(
                "{house_no}号 {} {}",
                pick(rng, ZH_STREETS),
                pick(rng, ZH_STREET_KINDS)
            ),
            city: pick(rng, ZH_CITIES).to_string(),
            state_zip: format!("{} {}", pick(rng, ZH_STATES), rng.gen_range(10001..=99999)),
        },
    };

    let items: Vec<ModernItem> = CATALOGUE
        .iter()
        .map(|(english, chinese, price, quantity)| ModernItem {
            name: locale.text(english, chinese).to_owned(),
            price: *price,
            quantity: *quantity,
            total: round2(price * f64::from(*quantity)),
        })
        .collect();
    let subtotal = sum_cents(items.iter().map(|item| item.total));
    let tax = round2(subtotal * TAX_RATE);
    let total = sum_cents([subtotal, SHIPPING, tax]);

    let currency = locale.currency();
    let width = WIDTH as i32;
    let mut canvas = ctx.canvas(WIDTH, HEIGHT);

    canvas.rect(Rect::band(WIDTH, 0, 100), Some(ACCENT), Some(ACCENT), 1);
    canvas.text(50, 30, locale.text("MODERN SHOP", "现代商店"), 26.0, WHITE);
    canvas.text(
        width - 300,
        40,
        &format!("{} #{order_id}", locale.text("Order Confirmation", "订单确认")),
        16.0,
        WHITE,
    );

    canvas.rect(Rect::new(50, 130, width - 50, 240), Some(STRIPE_LIGHT), Some(FRAME), 1);
    let mut y = 150;
    canvas.text(
        70,
        y,
        &format!("{} {order_date}", locale.text("Order Date:", "订单日期:")),
        16.0,
        INK,
    );
    y += 25;
    let summary = [
        format!("{} {order_id}", locale.text("Order ID:", "订单ID:")),
        format!("{} {status}", locale.text("Status:", "状态:")),
        format!(
            "{} {estimated_delivery}",
            locale.text("Estimated Delivery:", "预计送达:")
        ),
    ];
    y = bullet_list(&mut canvas, 70, y, 20, 14.0, SUBTLE, &summary);

    y += 30;
    canvas.text(50, y, locale.text("SHIPPING INFORMATION", "收货信息"), 20.0, HEADING);
    y += 30;
    let shipping_lines = [
        format!("{} {}", locale.text("Name:", "姓名:"), customer.name),
        format!("{} {}", locale.text("Address:", "地址:"), customer.address),
        format!("{} {}", locale.text("City:", "城市:"), customer.city),
        format!("{} {}", locale.text("State:", "地区:"), customer.state_zip),
    ];
    y = bullet_list(&mut canvas, 90, y, 25, 16.0, MUTED, &shipping_lines);

    y += 30;
    canvas.text(50, y, locale.text("ORDER ITEMS", "订单商品"), 20.0, HEADING);
    y += 40;
    let table = Table::new(70, width - 70, 90, &[310, 150, 100])
        .with_header(40, INK, WHITE)
        .with_row_height(50)
        .with_border(Some(rgb(222, 226, 230)));
    y = table.draw_header(
        &mut canvas,
        y,
        &[
            locale.text("PRODUCT", "商品"),
            locale.text("PRICE", "价格"),
            locale.text("QTY", "数量"),
            locale.text("TOTAL", "总计"),
        ],
    );
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                item.name.clone(),
                currency.amount(item.price),
                item.quantity.to_string(),
                currency.amount(item.total),
            ]
        })
        .collect();
    y = table.draw_rows(&mut canvas, y, &rows);

    y += 20;
    canvas.rect(Rect::new(width - 300, y, width - 70, y + 160), Some(STRIPE_LIGHT), Some(FRAME), 1);
    let totals = [
        (locale.text("Subtotal:", "小计:"), currency.amount(subtotal)),
        (locale.text("Shipping:", "运费:"), currency.amount(SHIPPING)),
        (locale.text("Tax (8%):", "税费(8%):"), currency.amount(tax)),
        (locale.text("Total:", "总计:"), currency.amount(total)),
    ];
    summary_block(&mut canvas, (width - 280, width - 120), y + 20, 30, 16.0, INK, &totals);

    y += 180;
    canvas.rect(Rect::new(70, y, width - 70, y + 80), Some(STRIPE_LIGHT), Some(FRAME), 1);
    canvas.text(
        90,
        y + 15,
        locale.text("Thank you for your order!", "感谢您的订购！"),
        26.0,
        ACCENT,
    );
    canvas.text(
        90,
        y + 50,
        locale.text(
            "Questions? Contact us at support@modernshop.com",
            "问题？联系我们 support@modernshop.com",
        ),
        14.0,
        SUBTLE,
    );

    let record = ModernOrder {
        order_id: order_id.to_owned(),
        order_date,
        status,
        estimated_delivery,
        customer_info: customer,
        items,
        subtotal,
        shipping: SHIPPING,
        tax,
        total,
    };

    (canvas.finish(), OrderRecord::Modern(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::context;

    fn record(seed: u64, locale: Locale) -> ModernOrder {
        match generate("ORD0005", &mut context(seed, locale)).1 {
            OrderRecord::Modern(record) => record,
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn catalogue_totals_are_consistent() {
        let order = record(1, Locale::English);
        assert_eq!(order.items.len(), 4);
        assert_eq!(order.items[1].total, 79.98);
        assert_eq!(order.subtotal, 619.95);
        assert_eq!(order.shipping, 15.99);
        assert_eq!(order.tax, 49.6);
        assert_eq!(order.total, 685.54);
    }

    #[test]
    fn dates_follow_the_locale() {
        let english = record(2, Locale::English);
        assert!(english.order_date.contains(", 202"));
        assert!(english.estimated_delivery.starts_with("January") || english.estimated_delivery.starts_with("February"));

        let chinese = record(2, Locale::Chinese);
        assert!(chinese.order_date.contains('年') && chinese.order_date.ends_with('日'));
        assert!(chinese.estimated_delivery.starts_with("2026年"));
        assert_eq!(chinese.items[0].name, "高端无线耳机");
    }

    #[test]
    fn customer_values_come_from_pools() {
        let order = record(8, Locale::English);
        assert!(EN_CITIES.contains(&order.customer_info.city.as_str()));
        let (state, zip) = order
            .customer_info
            .state_zip
            .split_once(' ')
            .expect("state and zip");
        assert!(EN_STATES.contains(&state));
        assert_eq!(zip.len(), 5);
    }
}
