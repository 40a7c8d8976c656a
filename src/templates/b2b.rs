//! Corporate purchase order with contract data, credit line and per-line VAT.

use chrono::Duration;
use image::RgbImage;
use rand::Rng;

use super::{GenerationContext, DATE, VAT_RATES};
use crate::canvas::{rgb, Color, Rect, BLACK, WHITE};
use crate::layout::{bullet_list, striped_lines, summary_block, Table, HEADING, INK, MUTED, RULE, STRIPE_LIGHT};
use crate::model::{B2bCompany, B2bItem, B2bOrder, OrderRecord};
use crate::money::{format_percent, round2, sum_cents, Currency};
use crate::pools::{days_before, digits, money_between, pick};

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 950;

const HEADER: Color = rgb(44, 62, 80);
const SUBTITLE: Color = rgb(200, 200, 200);
const STRIPE_ALT: Color = rgb(253, 253, 254);

const SELLER: &str = "ABC科技集团有限公司";

const PRODUCTS: &[&str] = &[
    "服务器CPU Intel Xeon",
    "企业级固态硬盘",
    "网络交换机",
    "路由器",
    "UPS不间断电源",
    "机柜",
    "网线",
    "光纤跳线",
    "防火墙设备",
    "负载均衡器",
    "VPN网关",
    "无线AP",
    "监控摄像头",
    "门禁系统",
];
const UNITS: &[&str] = &["台", "个", "套", "件", "批"];
const PAYMENT_TERMS: &[&str] = &["30天账期", "60天账期", "90天账期", "预付款", "货到付款"];
const INDUSTRIES: &[&str] = &["科技", "贸易", "制造", "电子", "机械", "化工"];
const SURNAMES: &[&str] = &["张", "李", "王", "刘", "陈"];
const ROLES: &[&str] = &["经理", "主管", "总监", "主任"];
const PARKS: &[&str] = &["商务园", "科技园", "工业区"];
const CITIES: &[&str] = &["北京", "上海", "广州", "深圳", "杭州", "苏州", "武汉", "成都"];

const CONTRACT_TERMS: [&str; 4] = [
    "• 质量保证期：验收合格后12个月",
    "• 售后服务：7×24小时技术支持",
    "• 违约责任：按合同法相关规定执行",
    "• 争议解决：提交甲方所在地法院管辖",
];

fn buyer<R: Rng + ?Sized>(rng: &mut R) -> B2bCompany {
    B2bCompany {
        name: format!("{}{}有限公司", pick(rng, INDUSTRIES), rng.gen_range(100..=999)),
        contact_person: format!("{}{}", pick(rng, SURNAMES), pick(rng, ROLES)),
        address: format!(
            "{} {} {}号楼",
            rng.gen_range(1..=999),
            pick(rng, PARKS),
            rng.gen_range(1..=20)
        ),
        city: pick(rng, CITIES).to_string(),
        tax_id: format!("91{}", digits(rng, 17)),
    }
}

fn line_item<R: Rng + ?Sized>(rng: &mut R, index: usize) -> B2bItem {
    let name = pick(rng, PRODUCTS).to_string();
    let model = format!("M{}", rng.gen_range(1000..=9999));
    let unit = pick(rng, UNITS).to_string();
    let unit_price = money_between(rng, 100.0, 10000.0);
    let quantity = rng.gen_range(1..=20);
    let tax_rate = *pick(rng, VAT_RATES);
    let amount = round2(unit_price * f64::from(quantity));

    B2bItem {
        index: index.to_string(),
        name,
        model,
        unit,
        unit_price,
        quantity,
        amount,
        tax_rate,
        tax_amount: round2(amount * tax_rate),
    }
}

pub fn generate(order_id: &str, ctx: &mut GenerationContext) -> (RgbImage, OrderRecord) {
    let rng = &mut ctx.rng;

    let ordered_at = days_before(ctx.now, rng, 1..=30);
    let order_date = ordered_at.format(DATE).to_string();
    let contract_number = format!(
        "CT-{}-{}",
        rng.gen_range(10000..=99999),
        ordered_at.format("%Y")
    );
    let po_number = format!("PO-{}", rng.gen_range(10000..=99999));
    let credit_limit = money_between(rng, 10000.0, 100000.0);
    let credit_used = money_between(rng, 1000.0, credit_limit * 0.8);
    let payment_terms = pick(rng, PAYMENT_TERMS).to_string();
    let delivery_date = (ctx.now + Duration::days(rng.gen_range(5..=15)))
        .format(DATE)
        .to_string();
    let company = buyer(rng);

    let items: Vec<B2bItem> = (1..=rng.gen_range(3..=8))
        .map(|index| line_item(rng, index))
        .collect();

    let subtotal = sum_cents(items.iter().map(|item| item.amount));
    let tax = sum_cents(items.iter().map(|item| item.tax_amount));
    let discount_rate = rng.gen_range(0.02..=0.1);
    let discount = round2(subtotal * discount_rate);
    let shipping = money_between(rng, 0.0, 500.0);
    let total = sum_cents([subtotal, tax, shipping, -discount]);

    let yuan = Currency::YUAN;
    let width = WIDTH as i32;
    let mut canvas = ctx.canvas(WIDTH, HEIGHT);

    canvas.rect(Rect::band(WIDTH, 0, 100), Some(HEADER), Some(HEADER), 1);
    canvas.text(50, 25, SELLER, 22.0, WHITE);
    canvas.text(50, 60, "企业采购管理系统", 16.0, SUBTITLE);
    canvas.text(width - 250, 35, &format!("B2B订单 #{order_id}"), 16.0, WHITE);
    canvas.text(
        width - 250,
        65,
        &format!("合同编号: {contract_number}"),
        14.0,
        SUBTITLE,
    );

    let info = [
        format!("客户公司: {}", company.name),
        format!("联系人: {}", company.contact_person),
        format!("地址: {}, {}", company.address, company.city),
        format!("纳税人识别号: {}", company.tax_id),
        format!("采购订单号: {po_number}"),
        format!("交货日期: {delivery_date}"),
        format!("付款条件: {payment_terms}"),
        format!(
            "信用额度: {} | 已用: {}",
            yuan.grouped(credit_limit),
            yuan.grouped(credit_used)
        ),
    ];
    let mut y = striped_lines(
        &mut canvas,
        (50, width - 50),
        70,
        120,
        [STRIPE_LIGHT, STRIPE_ALT],
        &info,
    );

    y += 20;
    canvas.text(50, y, "采购商品清单", 20.0, HEADING);
    y += 40;
    let table = Table::new(50, width - 50, 60, &[60, 200, 120, 80, 100, 80, 100, 80, 80])
        .with_column_size(7, 14.0);
    y = table.draw_header(
        &mut canvas,
        y,
        &["序号", "商品名称", "型号", "单位", "单价", "数量", "金额", "税率", "税额"],
    );
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                item.index.clone(),
                item.name.clone(),
                item.model.clone(),
                item.unit.clone(),
                yuan.grouped(item.unit_price),
                item.quantity.to_string(),
                yuan.grouped(item.amount),
                format!("{:.0}%", item.tax_rate * 100.0),
                yuan.grouped(item.tax_amount),
            ]
        })
        .collect();
    y = table.draw_rows(&mut canvas, y, &rows);

    y += 20;
    canvas.rect(Rect::new(width - 350, y, width - 50, y + 200), Some(STRIPE_LIGHT), Some(RULE), 1);
    let summary = [
        ("商品合计:".to_owned(), yuan.grouped(subtotal)),
        (
            format!("折扣(-{}):", format_percent(discount_rate)),
            format!("-{}", yuan.grouped(discount)),
        ),
        ("运费:".to_owned(), yuan.grouped(shipping)),
        ("税额合计:".to_owned(), yuan.grouped(tax)),
        ("订单总额:".to_owned(), yuan.grouped(total)),
    ];
    summary_block(&mut canvas, (width - 330, width - 120), y + 20, 35, 16.0, INK, &summary);

    y += 220;
    canvas.text(50, y, "付款信息:", 20.0, HEADING);
    y += 35;
    let payment = [
        format!("付款条件: {payment_terms}"),
        "发票类型: 增值税专用发票".to_owned(),
        format!("开票信息: {} ({})", company.name, company.tax_id),
        format!("收货地址: {}, {}", company.address, company.city),
        format!("期望交期: {delivery_date}"),
    ];
    y = bullet_list(&mut canvas, 90, y, 28, 16.0, BLACK, &payment);

    y += 40;
    canvas.text(50, y, "合同条款:", 20.0, HEADING);
    y += 30;
    y = bullet_list(&mut canvas, 90, y, 25, 14.0, MUTED, &CONTRACT_TERMS);

    y += 40;
    canvas.rect(Rect::new(70, y, width - 70, y + 80), Some(STRIPE_LIGHT), Some(RULE), 1);
    canvas.text(90, y + 20, SELLER, 16.0, BLACK);
    canvas.text(
        90,
        y + 45,
        &format!("地址: 北京市海淀区中关村大街1号 | 电话: 010-12345678 | 订单 #{order_id}"),
        14.0,
        MUTED,
    );

    let record = B2bOrder {
        order_id: order_id.to_owned(),
        contract_number,
        po_number,
        order_date,
        delivery_date,
        payment_terms,
        credit_limit,
        credit_used,
        company_info: company,
        items,
        subtotal,
        discount,
        shipping,
        tax,
        total,
    };

    (canvas.finish(), OrderRecord::B2b(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::context;
    use crate::templates::Locale;

    fn record(seed: u64) -> B2bOrder {
        match generate("CXORD0002", &mut context(seed, Locale::Chinese)).1 {
            OrderRecord::B2b(record) => record,
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn line_taxes_use_vat_table() {
        for seed in 0..30 {
            let order = record(seed);
            assert!((3..=8).contains(&order.items.len()));
            for item in &order.items {
                assert!(VAT_RATES.contains(&item.tax_rate));
                assert_eq!(item.tax_amount, round2(item.amount * item.tax_rate));
                assert!(UNITS.contains(&item.unit.as_str()));
                assert!(item.model.starts_with('M') && item.model.len() == 5);
            }
            assert_eq!(order.tax, sum_cents(order.items.iter().map(|item| item.tax_amount)));
            let rate = order.discount / order.subtotal;
            assert!((0.019..=0.101).contains(&rate), "discount rate {rate}");
            assert_eq!(
                order.total,
                sum_cents([order.subtotal, order.tax, order.shipping, -order.discount])
            );
        }
    }

    #[test]
    fn contract_and_credit() {
        for seed in 0..10 {
            let order = record(seed);
            let year = &order.order_date[..4];
            assert!(order.contract_number.starts_with("CT-"));
            assert!(order.contract_number.ends_with(year));
            assert!(order.credit_used <= round2(order.credit_limit * 0.8) + 0.01);
            assert!(order.credit_used >= 1000.0);
            assert!(order.company_info.tax_id.starts_with("91"));
            assert_eq!(order.company_info.tax_id.len(), 19);
            assert!(order.company_info.name.ends_with("有限公司"));
        }
    }
}
