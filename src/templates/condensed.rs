//! Compact order summary with a bulleted item list and a boxed totals block.

use image::RgbImage;
use rand::Rng;

use super::{GenerationContext, Locale, DATE};
use crate::canvas::{rgb, Rect, BLACK};
use crate::layout::{centered_title, summary_block, MUTED};
use crate::model::{CondensedOrder, LineItem, OrderRecord};
use crate::money::{round2, sum_cents};
use crate::pools::{days_before, money_between, pick};

const WIDTH: u32 = 700;
const HEIGHT: u32 = 500;
const TAX_RATE: f64 = 0.08;

const ITEM_LINES: [(&str, &str, (u32, u32), (f64, f64)); 3] = [
    ("Item", "商品", (1, 3), (10.0, 100.0)),
    ("Product", "产品", (1, 2), (20.0, 200.0)),
    ("Accessory", "配件", (2, 5), (5.0, 50.0)),
];

const EN_STATUS: &[&str] = &["Completed", "Processing", "Shipped", "Delivered"];
const ZH_STATUS: &[&str] = &["已完成", "处理中", "已发货", "已签收"];

pub fn generate(order_id: &str, ctx: &mut GenerationContext) -> (RgbImage, OrderRecord) {
    let locale = ctx.locale;
    let rng = &mut ctx.rng;

    let date = days_before(ctx.now, rng, 1..=30).format(DATE).to_string();
    let customer_id = format!(
        "{}-{}",
        locale.text("CUST", "客户"),
        rng.gen_range(10000..=99999)
    );
    let status = pick(rng, locale.select(EN_STATUS, ZH_STATUS)).to_string();

    let items: Vec<LineItem> = ITEM_LINES
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

    let subtotal = sum_cents(items.iter().map(|item| item.subtotal));
    let shipping = money_between(rng, 0.0, 15.0);
    let tax = round2(subtotal * TAX_RATE);
    let total = sum_cents([subtotal, shipping, tax]);

    let currency = locale.currency();
    let width = WIDTH as i32;
    let mut canvas = ctx.canvas(WIDTH, HEIGHT);

    centered_title(
        &mut canvas,
        20,
        &format!("{} #{order_id}", locale.text("ORDER SUMMARY", "订单摘要")),
        22.0,
        BLACK,
    );

    let mut y = 60;
    for line in [
        format!("{} {date}", locale.text("Date:", "日期:")),
        format!("{} {customer_id}", locale.text("Customer ID:", "客户ID:")),
        format!("{} {status}", locale.text("Status:", "状态:")),
    ] {
        canvas.text(50, y, &line, 14.0, BLACK);
        y += 25;
    }

    y += 15;
    canvas.text(50, y, locale.text("ITEMS:", "商品:"), 16.0, BLACK);
    y += 25;
    for item in &items {
        canvas.text(50, y, &format!("• {} x{}", item.name, item.quantity), 14.0, BLACK);
        canvas.text(width - 150, y, &currency.amount(item.subtotal), 14.0, BLACK);
        y += 22;
    }

    y += 25;
    canvas.rect(Rect::new(50, y, width - 50, y + 100), None, Some(rgb(150, 150, 150)), 1);
    let totals = [
        (locale.text("Subtotal:", "小计:"), currency.amount(subtotal)),
        (locale.text("Shipping:", "运费:"), currency.amount(shipping)),
        (locale.text("Tax:", "税费:"), currency.amount(tax)),
        (locale.text("TOTAL:", "总计:"), currency.amount(total)),
    ];
    y = summary_block(&mut canvas, (70, width - 100), y + 10, 25, 16.0, BLACK, &totals);

    y += 20;
    canvas.text(
        50,
        y,
        locale.text("Thank you for your order!", "感谢您的订购！"),
        14.0,
        MUTED,
    );
    canvas.text(
        50,
        y + 20,
        locale.text(
            "Questions? Contact support@example.com",
            "问题？联系 support@example.com",
        ),
        12.0,
        MUTED,
    );

    let record = CondensedOrder {
        order_id: order_id.to_owned(),
        date,
        customer_id,
        status,
        items,
        subtotal,
        shipping,
        tax,
        total,
    };

    (canvas.finish(), OrderRecord::Condensed(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::{assert_cents, context};

    fn record(seed: u64, locale: Locale) -> CondensedOrder {
        match generate("ORD0004", &mut context(seed, locale)).1 {
            OrderRecord::Condensed(record) => record,
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn three_numbered_lines_and_summed_total() {
        for seed in 0..20 {
            let order = record(seed, Locale::English);
            assert_eq!(order.items.len(), 3);
            for (item, (english, ..)) in order.items.iter().zip(ITEM_LINES) {
                let number = item
                    .name
                    .strip_prefix(english)
                    .and_then(|rest| rest.strip_prefix(' '))
                    .and_then(|digits| digits.parse::<u32>().ok())
                    .expect("numbered item name");
                assert!((100..=999).contains(&number), "{}", item.name);
            }
            assert!((0.0..=15.0).contains(&order.shipping));
            assert_cents(order.shipping);
            assert_eq!(order.tax, round2(order.subtotal * TAX_RATE));
            assert_eq!(order.total, sum_cents([order.subtotal, order.shipping, order.tax]));
            assert!(order.customer_id.starts_with("CUST-"));
            assert_eq!(order.date.len(), 10);
        }
    }

    #[test]
    fn chinese_labels_and_status() {
        let order = record(4, Locale::Chinese);
        let accessory = &order.items[2].name;
        let number = accessory.strip_prefix("配件").expect("accessory prefix");
        assert_eq!(number.len(), 3);
        assert!(number.chars().all(|c| c.is_ascii_digit()));
        assert!(order.customer_id.starts_with("客户-"));
        assert!(ZH_STATUS.contains(&order.status.as_str()));
    }

    #[test]
    fn summary_fits_the_nominal_page() {
        let (image, _) = generate("ORD0004", &mut context(1, Locale::English));
        assert_eq!(image.dimensions(), (WIDTH, HEIGHT));
    }
}
