//! Shop order with a banner, striped customer block, bordered product table and totals.

use image::RgbImage;
use rand::Rng;

use super::{GenerationContext, Locale, CN_CITIES, CN_NAMES, CN_PROVINCES, CN_STREETS, DATE_TIME};
use crate::canvas::{rgb, Color, Rect, BLACK, WHITE};
use crate::layout::{centered_title, FieldList, Table, LABEL, MUTED};
use crate::model::{DetailedOrder, NumberedProduct, OrderRecord};
use crate::money::{round2, sum_cents};
use crate::pools::{days_before, money_between, pick};

const WIDTH: u32 = 900;
const HEIGHT: u32 = 800;
const TAX_RATE: f64 = 0.08;
const FREE_SHIPPING_FROM: f64 = 200.0;

const BANNER: Color = rgb(70, 130, 180);
const ALERT: Color = rgb(220, 20, 60);

const EN_SURNAMES: &[&str] = &["Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis"];
const EN_STREETS: &[&str] = &["Main", "Oak", "Pine", "Elm", "Maple"];
const EN_CITIES: &[&str] = &["New York", "Los Angeles", "Chicago", "Houston", "Phoenix"];
const EN_STATES: &[&str] = &["NY", "CA", "IL", "TX", "AZ"];
const EN_SHIPPING: &[&str] = &["Standard", "Express", "Overnight", "Free Shipping"];
const ZH_SHIPPING: &[&str] = &["标准配送", "快递", "隔夜达", "免运费"];
const EN_PAYMENT: &[&str] = &["Credit Card", "PayPal", "Bank Transfer", "Cash on Delivery"];
const ZH_PAYMENT: &[&str] = &["信用卡", "支付宝", "银行转账", "货到付款"];
const EN_STATUS: &[&str] = &["Processing", "Shipped", "Delivered", "Cancelled"];
const ZH_STATUS: &[&str] = &["处理中", "已发货", "已签收", "已取消"];

const EN_PRODUCTS: &[&str] = &[
    "Wireless Headphones",
    "Smart Watch Series 5",
    "Bluetooth Speaker",
    "Laptop Stand",
    "USB-C Cable 2m",
    "Phone Case",
    "Power Bank 20000mAh",
    "Wireless Charger",
    "Noise Cancelling Earbuds",
    "Gaming Mouse RGB",
];
const ZH_PRODUCTS: &[&str] = &[
    "无线耳机",
    "智能手表5代",
    "蓝牙音箱",
    "笔记本支架",
    "USB-C数据线2米",
    "手机壳",
    "充电宝20000毫安",
    "无线充电器",
    "降噪耳塞",
    "RGB游戏鼠标",
];

pub fn generate(order_id: &str, ctx: &mut GenerationContext) -> (RgbImage, OrderRecord) {
    let locale = ctx.locale;
    let rng = &mut ctx.rng;

    let order_date = days_before(ctx.now, rng, 1..=30).format(DATE_TIME).to_string();
    let (customer_name, phone, shipping_address) = match locale {
        Locale::English => (
            format!("Customer {}", pick(rng, EN_SURNAMES)),
            format!(
                "+1-{}-{}-{}",
                rng.gen_range(100..=999),
                rng.gen_range(100..=999),
                rng.gen_range(1000..=9999)
            ),
            format!(
                "{} {} St, {}, {}",
                rng.gen_range(100..=9999),
                pick(rng, EN_STREETS),
                pick(rng, EN_CITIES),
                pick(rng, EN_STATES)
            ),
        ),
        Locale::Chinese => (
            format!("客户{}", pick(rng, CN_NAMES)),
            format!("138-{}-{}", rng.gen_range(1000..=9999), rng.gen_range(1000..=9999)),
            format!(
                "{} {}，{}，{}",
                rng.gen_range(100..=9999),
                pick(rng, CN_STREETS),
                pick(rng, CN_CITIES),
                pick(rng, CN_PROVINCES)
            ),
        ),
    };
    let shipping_method = pick(rng, locale.select(EN_SHIPPING, ZH_SHIPPING)).to_string();
    let payment_method = pick(rng, locale.select(EN_PAYMENT, ZH_PAYMENT)).to_string();
    let status = pick(rng, locale.select(EN_STATUS, ZH_STATUS)).to_string();

    let names = locale.select(EN_PRODUCTS, ZH_PRODUCTS);
    let products: Vec<NumberedProduct> = (1..=rng.gen_range(3..=7))
        .map(|number| {
            let product_name = pick(rng, names).to_string();
            let quantity = rng.gen_range(1..=5);
            let unit_price = money_between(rng, 10.0, 500.0);
            NumberedProduct {
                item_no: number.to_string(),
                product_name,
                unit_price,
                quantity,
                subtotal: round2(f64::from(quantity) * unit_price),
            }
        })
        .collect();

    let subtotal = sum_cents(products.iter().map(|p| p.subtotal));
    let shipping = if subtotal < FREE_SHIPPING_FROM {
        money_between(rng, 0.0, 50.0)
    } else {
        0.0
    };
    let tax = round2(subtotal * TAX_RATE);
    let grand_total = sum_cents([subtotal, shipping, tax]);

    let currency = locale.currency();
    let width = WIDTH as i32;
    let mut canvas = ctx.canvas(WIDTH, HEIGHT);

    canvas.rect(Rect::band(WIDTH, 0, 60), Some(BANNER), Some(BANNER), 1);
    canvas.text(
        30,
        18,
        locale.text("SHOP NAME - ORDER SYSTEM", "商店名称 - 订单系统"),
        20.0,
        WHITE,
    );
    centered_title(
        &mut canvas,
        80,
        &format!("{} #{order_id}", locale.text("DETAILED ORDER", "详细订单")),
        28.0,
        BLACK,
    );
    canvas.line((50, 130), (width - 50, 130), MUTED);

    let info = [
        (locale.text("Order ID:", "订单编号:"), order_id),
        (locale.text("Customer Name:", "客户姓名:"), customer_name.as_str()),
        (locale.text("Phone:", "电话:"), phone.as_str()),
        (locale.text("Shipping Address:", "收货地址:"), shipping_address.as_str()),
        (locale.text("Order Date:", "订单日期:"), order_date.as_str()),
        (locale.text("Shipping Method:", "配送方式:"), shipping_method.as_str()),
        (locale.text("Payment Method:", "支付方式:"), payment_method.as_str()),
        (locale.text("Status:", "状态:"), status.as_str()),
    ];
    let mut y = FieldList::new(70, 250, 35)
        .with_stripes(50, width - 50, rgb(245, 245, 245), WHITE)
        .draw(&mut canvas, 150, &info);

    y += 30;
    let table = Table::new(50, width - 50, 70, &[60, 330, 120, 110])
        .with_header(40, rgb(230, 240, 250), rgb(30, 30, 30))
        .with_header_outline(MUTED)
        .with_header_size(18.0)
        .with_row_height(40)
        .with_stripes(rgb(250, 250, 250), WHITE)
        .with_border(Some(rgb(200, 200, 200)))
        .with_text(BLACK, 16.0);
    y = table.draw_header(
        &mut canvas,
        y,
        &[
            locale.text("No.", "编号"),
            locale.text("Product Name", "商品名称"),
            locale.text("Unit Price($)", "单价(元)"),
            locale.text("Qty", "数量"),
            locale.text("Subtotal($)", "小计(元)"),
        ],
    );
    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| {
            vec![
                p.item_no.clone(),
                p.product_name.clone(),
                format!("{:.2}", p.unit_price),
                p.quantity.to_string(),
                format!("{:.2}", p.subtotal),
            ]
        })
        .collect();
    y = table.draw_rows(&mut canvas, y, &rows) + 20;

    canvas.line((50, y - 10), (width - 50, y - 10), MUTED);
    let totals = [
        (locale.text("Subtotal:", "小计:"), currency.amount(subtotal)),
        (locale.text("Shipping:", "运费:"), currency.amount(shipping)),
        (locale.text("Tax (8%):", "税费(8%):"), currency.amount(tax)),
        (locale.text("Grand Total:", "总计:"), currency.amount(grand_total)),
    ];
    y = FieldList::new(width - 250, width - 120, 35)
        .with_colors(LABEL, BLACK)
        .draw(&mut canvas, y, &totals);

    y += 15;
    canvas.text(
        width - 250,
        y,
        &format!(
            "{} {}",
            locale.text("AMOUNT DUE:", "应付金额:"),
            currency.amount(grand_total)
        ),
        24.0,
        ALERT,
    );

    y += 60;
    let footer = match locale {
        Locale::English => format!("Thank you for your business! Order #{order_id}"),
        Locale::Chinese => format!("感谢您的光临！订单 #{order_id}"),
    };
    canvas.text(70, y, &footer, 16.0, MUTED);

    let record = DetailedOrder {
        order_id: order_id.to_owned(),
        customer_name,
        phone,
        shipping_address,
        order_date,
        shipping_method,
        payment_method,
        status,
        products,
        subtotal,
        shipping,
        tax,
        grand_total,
    };

    (canvas.finish(), OrderRecord::Detailed(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::context;

    fn record(seed: u64, locale: Locale) -> DetailedOrder {
        match generate("ORD0002", &mut context(seed, locale)).1 {
            OrderRecord::Detailed(record) => record,
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn totals_follow_shipping_and_tax_rules() {
        for seed in 0..30 {
            let order = record(seed, Locale::English);
            assert!((3..=7).contains(&order.products.len()));
            assert_eq!(order.subtotal, sum_cents(order.products.iter().map(|p| p.subtotal)));
            if order.subtotal >= FREE_SHIPPING_FROM {
                assert_eq!(order.shipping, 0.0);
            } else {
                assert!((0.0..=50.0).contains(&order.shipping));
            }
            assert_eq!(order.tax, round2(order.subtotal * TAX_RATE));
            assert_eq!(order.grand_total, sum_cents([order.subtotal, order.shipping, order.tax]));
            for (index, product) in order.products.iter().enumerate() {
                assert_eq!(product.item_no, (index + 1).to_string());
                assert!(EN_PRODUCTS.contains(&product.product_name.as_str()));
            }
        }
    }

    #[test]
    fn values_come_from_locale_pools() {
        let order = record(5, Locale::Chinese);
        assert!(ZH_SHIPPING.contains(&order.shipping_method.as_str()));
        assert!(ZH_PAYMENT.contains(&order.payment_method.as_str()));
        assert!(ZH_STATUS.contains(&order.status.as_str()));
        assert!(order.customer_name.starts_with("客户"));

        let order = record(5, Locale::English);
        assert!(EN_SHIPPING.contains(&order.shipping_method.as_str()));
        assert!(order.customer_name.starts_with("Customer "));
    }

    #[test]
    fn long_orders_extend_the_page() {
        let tall = (0..40)
            .map(|seed| generate("ORD0002", &mut context(seed, Locale::English)))
            .find(|(_, record)| matches!(record, OrderRecord::Detailed(o) if o.products.len() == 7));
        if let Some((image, _)) = tall {
            assert!(image.height() > HEIGHT);
        }
    }
}
