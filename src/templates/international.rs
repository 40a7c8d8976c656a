//! Cross-border order with customs data, duties, exchange rate and a tracking timeline.

use chrono::Duration;
use image::RgbImage;
use rand::Rng;

use super::{GenerationContext, DATE};
use crate::canvas::{rgb, Color, Rect, BLACK, WHITE};
use crate::layout::{bullet_list, striped_lines, summary_block, Table, HEADING, INK, MUTED, RULE, STRIPE_LIGHT};
use crate::model::{InternationalCustomer, InternationalItem, InternationalOrder, OrderRecord};
use crate::money::{format_percent, round2, sum_cents, Currency};
use crate::pools::{days_before, money_between, pick};

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 1000;

const HEADER: Color = rgb(52, 152, 219);
const TABLE_HEADER: Color = rgb(41, 128, 185);
const SUBTITLE: Color = rgb(200, 200, 200);
const STRIPE_EVEN: Color = rgb(236, 240, 241);
const RATE_FILL: Color = rgb(235, 245, 251);
const RATE_EDGE: Color = rgb(173, 216, 230);

const CARRIERS: &[&str] = &["DHL", "FedEx", "UPS", "TNT", "中国邮政"];
const ORIGINS: &[&str] = &["中国", "美国", "德国", "日本", "韩国"];
const DESTINATIONS: &[&str] = &["美国", "加拿大", "英国", "德国", "法国", "澳大利亚", "日本"];
const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "JPY", "CNY"];
const SURNAMES: &[&str] = &["Johnson", "Smith", "Williams", "Brown", "Jones"];
const ORGANISATIONS: &[&str] = &["International Corp", "Global Trading", "Worldwide Ltd", "Enterprise Inc"];
const STREETS: &[&str] = &["Main St", "Oak Ave", "Pine Rd", "Elm Blvd"];
const CITIES: &[&str] = &["New York", "London", "Tokyo", "Sydney", "Toronto"];
const PRODUCTS: &[&str] = &[
    "智能手机",
    "笔记本电脑",
    "平板电脑",
    "智能手表",
    "蓝牙耳机",
    "移动电源",
    "数码相机",
    "无人机",
    "智能音箱",
    "VR眼镜",
    "游戏手柄",
    "机械键盘",
];
const FACTORIES: &[&str] = &["中国", "马来西亚", "泰国", "越南"];

const TRADE_TERMS: [&str; 5] = [
    "• 贸易条款: FOB (离岸价)",
    "• 付款方式: 信用证(L/C) 或 电汇(T/T)",
    "• 包装要求: 出口标准包装",
    "• 保险: 由买方自行购买",
    "• 质检: 符合目的地国家标准",
];

/// VAT registration printed for destinations that require one.
fn vat_number<R: Rng + ?Sized>(rng: &mut R, destination: &str) -> String {
    match destination {
        "英国" => format!("GB{}", rng.gen_range(100_000_000..=999_999_999u32)),
        "德国" => format!("DE{}", rng.gen_range(100_000_000..=999_999_999u32)),
        _ => String::new(),
    }
}

fn line_item<R: Rng + ?Sized>(rng: &mut R, index: usize) -> InternationalItem {
    let name = pick(rng, PRODUCTS).to_string();
    let hs_code = format!(
        "{}{}00",
        rng.gen_range(8517..=8548),
        rng.gen_range(10..=99)
    );
    let origin_country = pick(rng, FACTORIES).to_string();
    let unit_price_usd = money_between(rng, 10.0, 500.0);
    let quantity = rng.gen_range(1..=100);
    let tariff_code = format!("TC{}", rng.gen_range(1000..=9999));
    let tariff_rate = round2(rng.gen_range(0.05..=0.25));

    InternationalItem {
        index: index.to_string(),
        name,
        hs_code,
        origin_country,
        unit_price_usd,
        quantity,
        total_price_usd: round2(unit_price_usd * f64::from(quantity)),
        tariff_code,
        tariff_rate,
    }
}

pub fn generate(order_id: &str, ctx: &mut GenerationContext) -> (RgbImage, OrderRecord) {
    let now = ctx.now;
    let rng = &mut ctx.rng;

    let ordered_at = days_before(now, rng, 1..=30);
    let tracking_number = format!("TRK{}", rng.gen_range(100_000_000..=999_999_999u32));
    let shipping_carrier = pick(rng, CARRIERS).to_string();
    let origin_country = pick(rng, ORIGINS).to_string();
    let destination_country = pick(rng, DESTINATIONS).to_string();
    let currency: &'static str = *pick(rng, CURRENCIES);
    let exchange_rate = if currency == "USD" {
        round2(rng.gen_range(6.0..=8.0))
    } else {
        1.0
    };
    let customer = InternationalCustomer {
        name: format!("{}, {}", pick(rng, SURNAMES), pick(rng, ORGANISATIONS)),
        address: format!(
            "{} {}, {}",
            rng.gen_range(100..=9999),
            pick(rng, STREETS),
            pick(rng, CITIES)
        ),
        vat_number: vat_number(rng, &destination_country),
    };

    let items: Vec<InternationalItem> = (1..=rng.gen_range(3..=6))
        .map(|index| line_item(rng, index))
        .collect();

    let subtotal_usd = sum_cents(items.iter().map(|item| item.total_price_usd));
    let duty_rate = rng.gen_range(0.05..=0.30);
    let duty_usd = round2(subtotal_usd * duty_rate);
    let tax_rate = rng.gen_range(0.05..=0.25);
    let tax_usd = round2((subtotal_usd + duty_usd) * tax_rate);
    let shipping_usd = money_between(rng, 50.0, 500.0);
    let total_usd = sum_cents([subtotal_usd, tax_usd, shipping_usd, duty_usd]);

    let order_date = ordered_at.format(DATE).to_string();
    let money = |value: f64| Currency::Suffix(currency).amount(value);
    let width = WIDTH as i32;
    let mut canvas = ctx.canvas(WIDTH, HEIGHT);

    canvas.rect(Rect::band(WIDTH, 0, 100), Some(HEADER), Some(HEADER), 1);
    canvas.text(50, 25, "全球贸易平台 - 国际订单系统", 20.0, WHITE);
    canvas.text(
        50,
        60,
        &format!("订单编号: {order_id} | 跟踪号: {tracking_number}"),
        16.0,
        SUBTITLE,
    );

    let vat_display = if customer.vat_number.is_empty() {
        "N/A"
    } else {
        customer.vat_number.as_str()
    };
    let info = [
        format!("发货国家: {origin_country}"),
        format!("目的国家: {destination_country}"),
        format!("承运商: {shipping_carrier}"),
        format!("货币单位: {currency}"),
        format!("汇率: 1{currency} = {exchange_rate:.2}CNY"),
        format!("客户名称: {}", customer.name),
        format!("客户地址: {}", customer.address),
        format!("增值税号: {vat_display}"),
    ];
    let mut y = striped_lines(
        &mut canvas,
        (50, width - 50),
        70,
        120,
        [STRIPE_EVEN, STRIPE_LIGHT],
        &info,
    );

    y += 20;
    canvas.text(50, y, "国际商品清单", 20.0, HEADING);
    y += 40;
    let table = Table::new(50, width - 50, 60, &[60, 180, 100, 80, 100, 80, 100, 100, 100])
        .with_header(40, TABLE_HEADER, WHITE)
        .with_header_size(14.0)
        .with_text(INK, 14.0)
        .with_column_size(0, 16.0);
    y = table.draw_header(
        &mut canvas,
        y,
        &["序号", "商品名称", "HS编码", "原产国", "单价", "数量", "总价", "关税码", "税率"],
    );
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                item.index.clone(),
                item.name.clone(),
                item.hs_code.clone(),
                item.origin_country.clone(),
                money(item.unit_price_usd),
                item.quantity.to_string(),
                money(item.total_price_usd),
                item.tariff_code.clone(),
                format_percent(item.tariff_rate),
            ]
        })
        .collect();
    y = table.draw_rows(&mut canvas, y, &rows);

    y += 20;
    canvas.text(50, y, "费用明细:", 20.0, HEADING);
    y += 40;
    let fees = [
        ("商品小计:".to_owned(), money(subtotal_usd)),
        ("国际运费:".to_owned(), money(shipping_usd)),
        (format!("进口关税({}):", format_percent(duty_rate)), money(duty_usd)),
        (format!("当地税费({}):", format_percent(tax_rate)), money(tax_usd)),
        ("订单总额:".to_owned(), money(total_usd)),
    ];
    y = summary_block(&mut canvas, (90, width - 200), y, 30, 16.0, INK, &fees);

    y += 20;
    canvas.text(50, y, "物流追踪信息:", 20.0, HEADING);
    y += 40;
    let shipped = now.format(DATE).to_string();
    let timeline = [
        format!("• {order_date} - 订单已接收"),
        format!("• {order_date} - 货物打包完成"),
        format!("• {shipped} - 货物已发出 ({shipping_carrier})"),
        format!("• {} - 清关中", (now + Duration::days(3)).format(DATE)),
        format!("• {} - 预计到达", (now + Duration::days(7)).format(DATE)),
    ];
    y = bullet_list(&mut canvas, 90, y, 28, 16.0, BLACK, &timeline);

    y += 30;
    canvas.text(50, y, "国际贸易条款:", 20.0, HEADING);
    y += 30;
    y = bullet_list(&mut canvas, 90, y, 25, 14.0, MUTED, &TRADE_TERMS);

    y += 30;
    canvas.rect(Rect::new(70, y, width - 70, y + 50), Some(RATE_FILL), Some(RATE_EDGE), 1);
    canvas.text(
        90,
        y + 15,
        &format!(
            "汇率参考: 1{currency} = {exchange_rate:.2}CNY | 总计: {} ≈ {:.2}CNY",
            money(total_usd),
            total_usd * exchange_rate
        ),
        16.0,
        INK,
    );

    y += 70;
    canvas.rect(Rect::new(70, y, width - 70, y + 80), Some(STRIPE_LIGHT), Some(RULE), 1);
    canvas.text(90, y + 20, "全球贸易平台", 16.0, BLACK);
    canvas.text(
        90,
        y + 45,
        &format!(
            "客服: international@globaltrade.com | 订单 #{order_id} | 跟踪号: {tracking_number}"
        ),
        14.0,
        MUTED,
    );

    let record = InternationalOrder {
        order_id: order_id.to_owned(),
        tracking_number,
        shipping_carrier,
        order_date,
        origin_country,
        destination_country,
        currency: currency.to_owned(),
        exchange_rate,
        customer_info: customer,
        items,
        subtotal_usd,
        tax_usd,
        shipping_usd,
        duty_usd,
        total_usd,
    };

    (canvas.finish(), OrderRecord::International(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::context;
    use crate::templates::Locale;

    fn record(seed: u64) -> InternationalOrder {
        match generate("CXORD0003", &mut context(seed, Locale::Chinese)).1 {
            OrderRecord::International(record) => record,
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn customs_fields_are_well_formed() {
        for seed in 0..30 {
            let order = record(seed);
            assert!(order.tracking_number.starts_with("TRK"));
            assert_eq!(order.tracking_number.len(), 12);
            for item in &order.items {
                assert_eq!(item.hs_code.len(), 8);
                assert!(item.hs_code.ends_with("00"));
                let heading: u32 = item.hs_code[..4].parse().expect("numeric heading");
                assert!((8517..=8548).contains(&heading));
                assert!((0.05..=0.25).contains(&item.tariff_rate));
                assert!(item.tariff_code.starts_with("TC"));
            }
        }
    }

    #[test]
    fn exchange_rate_and_vat_follow_currency_and_destination() {
        for seed in 0..40 {
            let order = record(seed);
            if order.currency == "USD" {
                assert!((6.0..=8.0).contains(&order.exchange_rate));
            } else {
                assert_eq!(order.exchange_rate, 1.0);
            }
            let vat = &order.customer_info.vat_number;
            match order.destination_country.as_str() {
                "英国" | "德国" => {
                    let prefix = if order.destination_country == "英国" { "GB" } else { "DE" };
                    let number: u32 = vat
                        .strip_prefix(prefix)
                        .and_then(|digits| digits.parse().ok())
                        .expect("numeric VAT registration");
                    assert!((100_000_000..=999_999_999).contains(&number), "{vat}");
                    assert_eq!(vat.len(), 11);
                }
                _ => assert!(vat.is_empty()),
            }
        }
    }

    #[test]
    fn duty_and_tax_compound() {
        for seed in 0..20 {
            let order = record(seed);
            let duty_rate = order.duty_usd / order.subtotal_usd;
            assert!((0.049..=0.301).contains(&duty_rate));
            let tax_rate = order.tax_usd / (order.subtotal_usd + order.duty_usd);
            assert!((0.049..=0.251).contains(&tax_rate));
            assert!((50.0..=500.0).contains(&order.shipping_usd));
        }
    }

    #[test]
    fn order_date_matches_the_printed_timeline() {
        for seed in 0..10 {
            let order = record(seed);
            assert_eq!(order.order_date.len(), 10, "{}", order.order_date);
            assert!(chrono::NaiveDate::parse_from_str(&order.order_date, DATE).is_ok());
        }
    }

    #[test]
    fn amounts_carry_the_currency_code() {
        assert_eq!(Currency::Suffix("EUR").amount(12.5), "12.50EUR");
    }
}
