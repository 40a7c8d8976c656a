//! Marketplace order: promotions, per-line discounts, loyalty points and remarks.
//!
//! The layout is Chinese-only; the context locale does not change it.

use image::RgbImage;
use rand::Rng;

use super::{GenerationContext, CN_CITIES, CN_NAMES, CN_PROVINCES, CN_STREETS, DATE_TIME};
use crate::canvas::{rgb, Color, Rect, BLACK, WHITE};
use crate::layout::{bullet_list, striped_fields, summary_block, Table, HEADING, INK, MUTED, RULE, STRIPE_LIGHT};
use crate::model::{EcommerceItem, EcommerceOrder, OrderRecord};
use crate::money::{round2, sum_cents, Currency};
use crate::pools::{chance, days_before, money_between, pick};

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 900;
const TAX_RATE: f64 = 0.1;
const FREE_SHIPPING_FROM: f64 = 300.0;
/// Points redeemed per yuan.
const POINTS_PER_YUAN: f64 = 100.0;

const BANNER: Color = rgb(231, 76, 60);
const PROMO_FILL: Color = rgb(255, 248, 220);
const PROMO_EDGE: Color = rgb(253, 234, 190);
const PROMO_TEXT: Color = rgb(243, 156, 18);
const STRIPE_ALT: Color = rgb(253, 253, 254);

const PROMOTIONS: [&str; 2] = ["满300减50", "会员折扣10%"];

const PRODUCTS: &[&str] = &[
    "iPhone 15 Pro Max 256GB",
    "MacBook Air M2 13英寸",
    "iPad Air 5 256GB",
    "AirPods Pro 2代",
    "Apple Watch Series 9",
    "Beats Studio Buds",
    "华为Mate 60 Pro",
    "小米14 Ultra",
    "OPPO Find X7",
    "vivo X100 Pro",
    "联想ThinkPad X1",
    "戴尔XPS 13",
    "华硕ROG魔霸",
    "微星GS66 Stealth",
];
const SPECIFICATIONS: &[&str] = &["64GB", "128GB", "256GB", "512GB", "1TB", "标准版", "高配版"];
const SHIPPING_METHODS: &[&str] = &["标准配送", "快递", "隔夜达", "免运费"];
const PAYMENT_METHODS: &[&str] = &["信用卡", "支付宝", "微信支付", "银行转账", "花呗"];
const STATUSES: &[&str] = &["待付款", "待发货", "已发货", "已签收", "已完成", "已取消"];

const REMARKS: [&str; 3] = [
    "• 请小心包装，易碎品",
    "• 工作日送货，节假日不配送",
    "• 如需发票请联系客服",
];

fn line_item<R: Rng + ?Sized>(rng: &mut R) -> EcommerceItem {
    let name = pick(rng, PRODUCTS).to_string();
    let specification = pick(rng, SPECIFICATIONS).to_string();
    let unit_price = money_between(rng, 100.0, 10000.0);
    let quantity = rng.gen_range(1..=3);
    let original_subtotal = round2(unit_price * f64::from(quantity));
    let discount = if chance(rng, 0.5) {
        round2(original_subtotal * rng.gen_range(0.05..=0.3))
    } else {
        0.0
    };

    EcommerceItem {
        name,
        specification,
        unit_price,
        quantity,
        original_subtotal,
        discount,
        final_subtotal: round2(original_subtotal - discount),
    }
}

/// Points spent on an order: everything available, up to ten per yuan of the amount due before points.
fn points_redeemed(available: u32, amount_due: f64) -> u32 {
    available.min((amount_due * 10.0).floor() as u32)
}

pub fn generate(order_id: &str, ctx: &mut GenerationContext) -> (RgbImage, OrderRecord) {
    let rng = &mut ctx.rng;

    let order_date = days_before(ctx.now, rng, 1..=30).format(DATE_TIME).to_string();
    let customer_name = format!("用户{}", pick(rng, CN_NAMES));
    let phone = format!("138-{}-{}", rng.gen_range(1000..=9999), rng.gen_range(1000..=9999));
    let shipping_address = format!(
        "{} {}，{}，{}",
        rng.gen_range(100..=9999),
        pick(rng, CN_STREETS),
        pick(rng, CN_CITIES),
        pick(rng, CN_PROVINCES)
    );
    let shipping_method = pick(rng, SHIPPING_METHODS).to_string();
    let payment_method = pick(rng, PAYMENT_METHODS).to_string();
    let status = pick(rng, STATUSES).to_string();

    let items: Vec<EcommerceItem> = (0..rng.gen_range(2..=5)).map(|_| line_item(rng)).collect();

    let original_total = sum_cents(items.iter().map(|item| item.original_subtotal));
    let discount_total = sum_cents(items.iter().map(|item| item.discount));
    let final_total = sum_cents(items.iter().map(|item| item.final_subtotal));
    let shipping_cost = if original_total < FREE_SHIPPING_FROM {
        money_between(rng, 0.0, 30.0)
    } else {
        0.0
    };
    let tax = round2(final_total * TAX_RATE);
    let points_available: u32 = rng.gen_range(0..=5000);
    let pre_points = sum_cents([final_total, shipping_cost, tax]);
    let points_used = points_redeemed(points_available, pre_points);
    let points_deduction = round2(f64::from(points_used) / POINTS_PER_YUAN);
    let payable = sum_cents([final_total, shipping_cost, tax, -points_deduction]);

    let yuan = Currency::YUAN;
    let width = WIDTH as i32;
    let mut canvas = ctx.canvas(WIDTH, HEIGHT);

    canvas.rect(Rect::band(WIDTH, 0, 80), Some(BANNER), Some(BANNER), 1);
    canvas.text(50, 25, "电商平台 - 订单中心", 20.0, WHITE);
    canvas.text(width - 250, 30, &format!("电商订单 #{order_id}"), 16.0, WHITE);

    let fields = [
        ("订单编号:", order_id),
        ("下单时间:", order_date.as_str()),
        ("客户姓名:", customer_name.as_str()),
        ("联系电话:", phone.as_str()),
        ("收货地址:", shipping_address.as_str()),
        ("配送方式:", shipping_method.as_str()),
        ("支付方式:", payment_method.as_str()),
        ("订单状态:", status.as_str()),
    ];
    let mut y = striped_fields(
        &mut canvas,
        (50, width - 50),
        (70, 250),
        100,
        [STRIPE_LIGHT, STRIPE_ALT],
        &fields,
    );

    y += 10;
    canvas.rect(Rect::new(50, y, width - 50, y + 40), Some(PROMO_FILL), Some(PROMO_EDGE), 1);
    canvas.text(
        70,
        y + 12,
        &format!("活动优惠: {} + {}", PROMOTIONS[0], PROMOTIONS[1]),
        16.0,
        PROMO_TEXT,
    );
    y += 50;

    canvas.text(50, y, "商品清单", 20.0, HEADING);
    y += 40;
    let table = Table::new(50, width - 50, 70, &[300, 150, 100, 80, 100, 100]).with_row_height(50);
    y = table.draw_header(&mut canvas, y, &["商品", "规格", "单价", "数量", "小计", "优惠"]);
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            let discount = if item.discount > 0.0 {
                format!("-{}", yuan.amount(item.discount))
            } else {
                "无".to_owned()
            };
            vec![
                item.name.clone(),
                item.specification.clone(),
                yuan.amount(item.unit_price),
                item.quantity.to_string(),
                yuan.amount(item.final_subtotal),
                discount,
            ]
        })
        .collect();
    y = table.draw_rows(&mut canvas, y, &rows);

    y += 20;
    canvas.rect(Rect::new(width - 350, y, width - 50, y + 220), Some(STRIPE_LIGHT), Some(RULE), 1);
    let shipping_text = if shipping_cost > 0.0 {
        yuan.amount(shipping_cost)
    } else {
        "免运费".to_owned()
    };
    let summary = [
        ("商品原价:", yuan.amount(original_total)),
        ("优惠金额:", format!("-{}", yuan.amount(discount_total))),
        ("运费:", shipping_text),
        ("税费(10%):", yuan.amount(tax)),
        ("积分抵扣:", format!("-{}", yuan.amount(points_deduction))),
        ("订单总额:", yuan.amount(payable)),
    ];
    summary_block(&mut canvas, (width - 330, width - 120), y + 20, 30, 16.0, INK, &summary);

    y += 240;
    canvas.text(50, y, "订单备注:", 20.0, HEADING);
    y += 30;
    y = bullet_list(&mut canvas, 90, y, 25, 14.0, MUTED, &REMARKS);

    y += 40;
    canvas.rect(Rect::new(70, y, width - 70, y + 60), Some(STRIPE_LIGHT), Some(RULE), 1);
    canvas.text(90, y + 15, &format!("感谢您在电商平台购物！订单 #{order_id}"), 16.0, BLACK);
    canvas.text(
        90,
        y + 35,
        "客服热线: 400-123-4567 | 客服邮箱: service@ecommerce.com",
        14.0,
        MUTED,
    );

    let record = EcommerceOrder {
        order_id: order_id.to_owned(),
        order_date,
        customer_name,
        phone,
        shipping_address,
        shipping_method,
        payment_method,
        status,
        promotions: PROMOTIONS.iter().map(|promo| promo.to_string()).collect(),
        items,
        original_total,
        discount_total,
        final_total: payable,
        points_used,
        points_deduction,
        shipping_cost,
        tax,
    };

    (canvas.finish(), OrderRecord::Ecommerce(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::{assert_cents, context};
    use crate::templates::Locale;

    fn record(seed: u64) -> EcommerceOrder {
        match generate("CXORD0001", &mut context(seed, Locale::English)).1 {
            OrderRecord::Ecommerce(record) => record,
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn discounts_and_points_add_up() {
        for seed in 0..40 {
            let order = record(seed);
            assert!((2..=5).contains(&order.items.len()));
            for item in &order.items {
                assert_eq!(item.original_subtotal, round2(item.unit_price * f64::from(item.quantity)));
                assert!(item.discount <= round2(item.original_subtotal * 0.3));
                assert_eq!(item.final_subtotal, round2(item.original_subtotal - item.discount));
                assert_cents(item.discount);
            }
            let lines = sum_cents(order.items.iter().map(|item| item.final_subtotal));
            assert_eq!(order.tax, round2(lines * TAX_RATE));
            let due = sum_cents([lines, order.shipping_cost, order.tax]);
            assert!(f64::from(order.points_used) <= (due * 10.0).floor());
            assert_eq!(order.points_deduction, round2(f64::from(order.points_used) / 100.0));
            if order.original_total >= FREE_SHIPPING_FROM {
                assert_eq!(order.shipping_cost, 0.0);
            }
            let expected = sum_cents([lines, order.shipping_cost, order.tax, -order.points_deduction]);
            assert_eq!(order.final_total, expected);
        }
    }

    #[test]
    fn points_cap_includes_shipping_and_tax() {
        // 100.00 of goods, 12.50 shipping and 10.00 tax
        let due = sum_cents([100.0, 12.5, 10.0]);
        assert_eq!(points_redeemed(5000, due), 1225);
        assert_eq!(points_redeemed(800, due), 800);
        assert_eq!(points_redeemed(0, due), 0);
    }

    #[test]
    fn layout_is_chinese_for_every_locale() {
        let english = generate("CXORD0002", &mut context(7, Locale::English));
        let chinese = generate("CXORD0002", &mut context(7, Locale::Chinese));
        assert_eq!(english.1, chinese.1);
        assert_eq!(english.0, chinese.0);
    }

    #[test]
    fn promotions_are_recorded() {
        let order = record(3);
        assert_eq!(order.promotions, ["满300减50", "会员折扣10%"]);
        assert!(order.customer_name.starts_with("用户"));
        assert!(STATUSES.contains(&order.status.as_str()));
    }
}
