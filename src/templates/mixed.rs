//! Multi-channel order combining retail promotions, business customers and overseas shipping.

use image::RgbImage;
use rand::Rng;

use super::{GenerationContext, CN_CITIES, CN_NAMES, CN_PROVINCES, DATE_TIME, VAT_RATES};
use crate::canvas::{rgb, Color, Rect, BLACK, WHITE};
use crate::layout::{
    bullet_list, right_aligned, summary_block, FieldList, Table, HEADING, INK, MUTED, RULE, STRIPE_LIGHT,
};
use crate::model::{MixedCustomer, MixedItem, MixedOrder, OrderRecord};
use crate::money::{format_percent, round2, sum_cents, Currency};
use crate::pools::{chance, days_before, money_between, pick, sample};

const WIDTH: u32 = 1050;
const HEIGHT: u32 = 1100;
const FREE_SHIPPING_FROM: f64 = 200.0;

const HEADER: Color = rgb(155, 89, 182);
const SUBTITLE: Color = rgb(236, 240, 241);
const STATUS_FILL: Color = rgb(236, 250, 255);
const STATUS_EDGE: Color = rgb(200, 220, 255);
const PROMO_FILL: Color = rgb(255, 248, 220);
const PROMO_EDGE: Color = rgb(253, 234, 190);
const PROMO_TEXT: Color = rgb(243, 156, 18);

const ORDER_TYPES: &[&str] = &["标准订单", "VIP订单", "企业订单", "批发订单", "定制订单"];
const PRIORITIES: &[&str] = &["普通", "加急", "特急"];
const PAYMENT_STATUSES: &[&str] = &["未支付", "部分支付", "已支付", "已退款"];
const FULFILLMENT_STATUSES: &[&str] = &["待处理", "拣货中", "打包中", "已发货", "已签收", "已完成"];
const INDUSTRIES: &[&str] = &["科技", "贸易", "制造", "电子", "机械"];
const LOCAL_STREETS: &[&str] = &["主街", "橡树街", "松树街"];
const OVERSEAS_STREETS: &[&str] = &["Main St", "Oak Ave", "Pine Rd"];
const OVERSEAS_CITIES: &[&str] = &["New York", "London", "Tokyo"];
const OVERSEAS_COUNTRIES: &[&str] = &["USA", "UK", "Japan"];

const PROMOTION_KINDS: &[&str] = &["满减", "折扣", "买赠", "积分", "优惠券", "会员价"];

const CATEGORIES: &[(&str, &[&str])] = &[
    ("电子产品", &["iPhone", "iPad", "MacBook", "AirPods", "Apple Watch"]),
    ("家电", &["电视", "冰箱", "洗衣机", "空调", "微波炉"]),
    ("服装", &["T恤", "牛仔裤", "外套", "运动鞋", "帽子"]),
    ("图书", &["小说", "技术书籍", "儿童读物", "杂志", "工具书"]),
    ("食品", &["零食", "饮料", "调料", "干货", "进口食品"]),
];
const EDITIONS: &[&str] = &["标准版", "高配版", "专业版", "豪华版", "限量版"];
const BRANDS: &[&str] = &["苹果", "华为", "小米", "三星", "索尼", "戴尔", "联想", "美的", "格力"];

const NOTES: [&str; 5] = [
    "• 此为混合订单，包含多种业务模式",
    "• 国际订单部分需注意关税政策",
    "• 企业客户享受批量采购优惠",
    "• VIP客户享有专属客服支持",
    "• 所有商品享受7天无理由退换",
];

fn promotion<R: Rng + ?Sized>(rng: &mut R, kind: &str) -> String {
    match kind {
        "满减" => format!("满{}减{}", rng.gen_range(100..=1000), rng.gen_range(10..=100)),
        "折扣" => format!("{}折优惠", rng.gen_range(80..=95)),
        "买赠" => format!("买{}送{}", rng.gen_range(2..=5), rng.gen_range(1..=2)),
        "积分" => format!("积分抵扣{}分", rng.gen_range(50..=500)),
        "优惠券" => format!("优惠券减免{}元", rng.gen_range(5..=50)),
        _ => format!("会员专享{}折", rng.gen_range(90..=98)),
    }
}

fn customer_info<R: Rng + ?Sized>(rng: &mut R) -> MixedCustomer {
    let name = format!("客户{}", pick(rng, CN_NAMES));
    let company = if chance(rng, 0.5) {
        format!("{}{}有限公司", pick(rng, INDUSTRIES), rng.gen_range(1..=999))
    } else {
        String::new()
    };
    let phone = format!("138-{}-{}", rng.gen_range(1000..=9999), rng.gen_range(1000..=9999));
    let email = format!("customer{}@example.com", rng.gen_range(1000..=9999));
    let is_international = chance(rng, 0.3);
    let house_no = rng.gen_range(100..=9999);
    let address = if is_international {
        format!(
            "{house_no} {}, {}, {}",
            pick(rng, OVERSEAS_STREETS),
            pick(rng, OVERSEAS_CITIES),
            pick(rng, OVERSEAS_COUNTRIES)
        )
    } else {
        format!(
            "{house_no} {}，{}，{}",
            pick(rng, LOCAL_STREETS),
            pick(rng, CN_CITIES),
            pick(rng, CN_PROVINCES)
        )
    };

    MixedCustomer {
        name,
        company,
        phone,
        email,
        address,
        is_international,
    }
}

fn line_item<R: Rng + ?Sized>(rng: &mut R, index: usize) -> MixedItem {
    let (category, goods) = pick(rng, CATEGORIES);
    let name = format!("{category}-{}", pick(rng, *goods));
    let specification = pick(rng, EDITIONS).to_string();
    let brand = pick(rng, BRANDS).to_string();
    let unit_price = money_between(rng, 10.0, 5000.0);
    let quantity = rng.gen_range(1..=5);
    let original_subtotal = round2(unit_price * f64::from(quantity));

    let discount = if chance(rng, 0.5) {
        if chance(rng, 0.5) {
            round2(original_subtotal * rng.gen_range(0.05..=0.3))
        } else {
            round2(rng.gen_range(10.0..=200.0_f64).min(original_subtotal * 0.5))
        }
    } else {
        0.0
    };
    let after_discount_subtotal = round2(original_subtotal - discount);
    let tax_rate = *pick(rng, VAT_RATES);
    let tax_amount = round2(after_discount_subtotal * tax_rate);

    MixedItem {
        index: index.to_string(),
        name,
        specification,
        brand,
        unit_price,
        quantity,
        original_subtotal,
        discount,
        after_discount_subtotal,
        tax_rate,
        tax_amount,
        final_price: round2(after_discount_subtotal + tax_amount),
    }
}

pub fn generate(order_id: &str, ctx: &mut GenerationContext) -> (RgbImage, OrderRecord) {
    let now = ctx.now;
    let rng = &mut ctx.rng;

    let order_type = pick(rng, ORDER_TYPES).to_string();
    let priority = pick(rng, PRIORITIES).to_string();
    let order_date = days_before(now, rng, 1..=30).format(DATE_TIME).to_string();
    let payment_status = pick(rng, PAYMENT_STATUSES).to_string();
    let fulfillment_status = pick(rng, FULFILLMENT_STATUSES).to_string();
    let customer = customer_info(rng);

    let promotion_count = rng.gen_range(0..=3);
    let kinds = sample(rng, PROMOTION_KINDS, promotion_count);
    let promotions: Vec<String> = kinds.into_iter().map(|kind| promotion(rng, kind)).collect();

    let items: Vec<MixedItem> = (1..=rng.gen_range(4..=8))
        .map(|index| line_item(rng, index))
        .collect();

    let original_total = sum_cents(items.iter().map(|item| item.original_subtotal));
    let discount_total = sum_cents(items.iter().map(|item| item.discount));
    let discounted_total = sum_cents(items.iter().map(|item| item.after_discount_subtotal));
    let tax_total = sum_cents(items.iter().map(|item| item.tax_amount));
    let shipping_total = if original_total < FREE_SHIPPING_FROM {
        money_between(rng, 0.0, 100.0)
    } else {
        0.0
    };
    let handling_fee = if chance(rng, 0.3) {
        money_between(rng, 0.0, 30.0)
    } else {
        0.0
    };
    let insurance = if customer.is_international {
        money_between(rng, 0.0, 50.0)
    } else {
        0.0
    };
    let other_fees = sum_cents([shipping_total, handling_fee, insurance]);
    let final_total = sum_cents([discounted_total, tax_total, other_fees]);

    let yuan = Currency::YUAN;
    let width = WIDTH as i32;
    let mut canvas = ctx.canvas(WIDTH, HEIGHT);

    canvas.rect(Rect::band(WIDTH, 0, 120), Some(HEADER), Some(HEADER), 1);
    canvas.text(50, 25, "全能商业平台", 32.0, WHITE);
    canvas.text(50, 70, "电商 · B2B · 国际贸易 · 批发 · 定制", 16.0, SUBTITLE);
    right_aligned(
        &mut canvas,
        50,
        40,
        &format!(
            "混合订单 #{order_id} | 类型: {order_type} | 优先级: {priority} | 状态: {payment_status}/{fulfillment_status}"
        ),
        14.0,
        WHITE,
    );

    let mut y = 140;
    canvas.rect(Rect::new(50, y, width - 50, y + 200), Some(STRIPE_LIGHT), Some(RULE), 1);
    canvas.text(70, y + 15, "客户信息", 22.0, HEADING);
    let company_label = if customer.company.is_empty() { "" } else { "公司名称:" };
    let international_label = if customer.is_international { "国际订单:" } else { "" };
    let fields = [
        ("客户姓名:", customer.name.as_str()),
        (company_label, customer.company.as_str()),
        ("联系电话:", customer.phone.as_str()),
        ("电子邮箱:", customer.email.as_str()),
        ("收货地址:", customer.address.as_str()),
        (international_label, if customer.is_international { "是" } else { "否" }),
    ];
    FieldList::new(90, 250, 25).draw(&mut canvas, y + 50, &fields);
    y += 220;

    canvas.rect(Rect::new(50, y, width - 50, y + 150), Some(STATUS_FILL), Some(STATUS_EDGE), 1);
    canvas.text(70, y + 15, "订单状态", 22.0, HEADING);
    let status_lines = [
        format!("订单日期: {order_date}"),
        format!("支付状态: {payment_status}"),
        format!("履约状态: {fulfillment_status}"),
        format!("订单类型: {order_type}"),
        format!("优先级别: {priority}"),
    ];
    bullet_list(&mut canvas, 90, y + 45, 20, 14.0, INK, &status_lines);
    y += 170;

    if promotions.is_empty() {
        y += 80;
    } else {
        let bottom = y + 40 + 25 * promotions.len() as i32;
        canvas.rect(Rect::new(50, y, width - 50, bottom), Some(PROMO_FILL), Some(PROMO_EDGE), 1);
        canvas.text(70, y + 15, "促销活动", 20.0, HEADING);
        bullet_list(&mut canvas, 90, y + 45, 25, 16.0, PROMO_TEXT, &promotions);
        y = bottom + 20;
    }

    canvas.text(50, y, "商品清单", 20.0, HEADING);
    y += 40;
    let table = Table::new(50, width - 50, 60, &[40, 170, 80, 60, 90, 50, 90, 90, 70, 100])
        .with_header_size(14.0)
        .with_text(INK, 14.0)
        .with_column_size(0, 16.0)
        .with_column_size(1, 16.0);
    y = table.draw_header(
        &mut canvas,
        y,
        &["序号", "商品名称", "规格", "品牌", "单价", "数量", "小计", "优惠", "税率", "最终价"],
    );
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            let discount = if item.discount > 0.0 {
                format!("-{}", yuan.amount(item.discount))
            } else {
                "无".to_owned()
            };
            vec![
                item.index.clone(),
                item.name.clone(),
                item.specification.clone(),
                item.brand.clone(),
                yuan.amount(item.unit_price),
                item.quantity.to_string(),
                yuan.amount(item.original_subtotal),
                discount,
                format_percent(item.tax_rate),
                yuan.amount(item.final_price),
            ]
        })
        .collect();
    y = table.draw_rows(&mut canvas, y, &rows);

    y += 20;
    canvas.rect(Rect::new(width - 380, y, width - 50, y + 320), Some(STRIPE_LIGHT), Some(RULE), 1);
    canvas.text(width - 360, y + 15, "费用汇总", 22.0, HEADING);
    let or_label = |amount: f64, none: &str| {
        if amount > 0.0 {
            yuan.amount(amount)
        } else {
            none.to_owned()
        }
    };
    let (insurance_label, insurance_value) = if customer.is_international {
        ("保险费:", yuan.amount(insurance))
    } else {
        ("", String::new())
    };
    let fees = [
        ("商品原价:", yuan.amount(original_total)),
        ("优惠金额:", format!("-{}", yuan.amount(discount_total))),
        ("优惠后小计:", yuan.amount(discounted_total)),
        ("税费合计:", yuan.amount(tax_total)),
        ("运费:", or_label(shipping_total, "免运费")),
        ("手续费:", or_label(handling_fee, "无")),
        (insurance_label, insurance_value),
        ("其他费用:", yuan.amount(other_fees)),
        ("订单总额:", yuan.amount(final_total)),
    ];
    summary_block(&mut canvas, (width - 360, width - 120), y + 50, 28, 16.0, INK, &fees);
    y += 340;

    if !promotions.is_empty() {
        canvas.text(50, y, "促销活动详情:", 20.0, HEADING);
        y += 35;
        let details: Vec<String> = promotions.iter().map(|promo| format!("• {promo}")).collect();
        y = bullet_list(&mut canvas, 90, y, 28, 16.0, PROMO_TEXT, &details);
    }

    y += 20;
    canvas.text(50, y, "特殊说明:", 20.0, HEADING);
    y += 35;
    y = bullet_list(&mut canvas, 90, y, 25, 14.0, MUTED, &NOTES);

    y += 40;
    canvas.rect(Rect::new(70, y, width - 70, y + 100), Some(STRIPE_LIGHT), Some(RULE), 1);
    let footer = [
        "全能商业平台 - 您的一站式商业解决方案".to_owned(),
        "客服热线: 400-8888-9999 | 客服邮箱: service@allbusiness.com".to_owned(),
        format!("订单 #{order_id} | 生成时间: {}", now.format(DATE_TIME)),
    ];
    canvas.text(90, y + 15, &footer[0], 16.0, BLACK);
    bullet_list(&mut canvas, 90, y + 45, 25, 14.0, MUTED, &footer[1..]);

    let record = MixedOrder {
        order_id: order_id.to_owned(),
        order_type,
        priority,
        order_date,
        payment_status,
        fulfillment_status,
        customer_info: customer,
        promotions,
        items,
        original_total,
        discount_total,
        tax_total,
        shipping_total,
        other_fees,
        final_total,
        handling_fee,
        insurance,
    };

    (canvas.finish(), OrderRecord::Mixed(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::context;
    use crate::templates::Locale;

    fn record(seed: u64) -> MixedOrder {
        match generate("CXORD0004", &mut context(seed, Locale::Chinese)).1 {
            OrderRecord::Mixed(record) => record,
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn line_prices_include_discount_and_vat() {
        for seed in 0..40 {
            let order = record(seed);
            assert!((4..=8).contains(&order.items.len()));
            for item in &order.items {
                assert!(item.discount >= 0.0);
                assert!(item.discount <= round2(item.original_subtotal * 0.5));
                assert_eq!(item.after_discount_subtotal, round2(item.original_subtotal - item.discount));
                assert_eq!(item.tax_amount, round2(item.after_discount_subtotal * item.tax_rate));
                assert_eq!(item.final_price, round2(item.after_discount_subtotal + item.tax_amount));
                let (category, _) = item.name.split_once('-').expect("category prefix");
                assert!(CATEGORIES.iter().any(|(name, _)| *name == category));
            }
        }
    }

    #[test]
    fn fees_depend_on_customer_and_order_size() {
        for seed in 0..60 {
            let order = record(seed);
            if !order.customer_info.is_international {
                assert_eq!(order.insurance, 0.0);
            }
            if order.original_total >= FREE_SHIPPING_FROM {
                assert_eq!(order.shipping_total, 0.0);
            }
            assert_eq!(
                order.other_fees,
                sum_cents([order.shipping_total, order.handling_fee, order.insurance])
            );
            assert!(order.promotions.len() <= 3);
            if order.customer_info.is_international {
                assert!(!order.customer_info.address.contains('，'));
            }
        }
    }

    #[test]
    fn promotions_use_known_templates() {
        let all: Vec<String> = (0..30).flat_map(|seed| record(seed).promotions).collect();
        assert!(!all.is_empty());
        for promo in &all {
            assert!(
                ["满", "折", "买", "积分", "优惠券", "会员"]
                    .iter()
                    .any(|marker| promo.contains(marker)),
                "{promo}"
            );
        }
    }
}
