//! Made-to-order job sheet: customization options, design preview, schedule, QA and costs.

use chrono::Duration;
use image::RgbImage;
use rand::Rng;

use super::{GenerationContext, DATE, DATE_TIME};
use crate::canvas::{rgb, Color, Rect, BLACK, WHITE};
use crate::layout::{bullet_list, FieldList, Table, HEADING, INK, MUTED, RULE, SLATE, STRIPE_LIGHT};
use crate::model::{
    CustomizationDetails, CustomizedCustomer, CustomizedItem, CustomizedOrder, OrderRecord, QualityCheck,
    ScheduleStage,
};
use crate::money::{round2, sum_cents, Currency};
use crate::pools::{chance, days_before, money_between, pick};

const WIDTH: u32 = 1050;
const HEIGHT: u32 = 1200;
const TAX_RATE: f64 = 0.13;
const ORDER_TYPE: &str = "定制订单";

const HEADER: Color = rgb(46, 204, 113);
const PREVIEW_FILL: Color = rgb(250, 250, 250);
const PREVIEW_EDGE: Color = rgb(200, 200, 200);
const CONFIRMED: Color = rgb(243, 156, 18);

const LEVELS: &[&str] = &["基础定制", "深度定制", "完全定制"];
const PRODUCTION_STATUSES: &[&str] = &["设计中", "打样中", "生产中", "质检中", "包装中", "待发货"];
/// Statuses at or after inspection, where QA results exist.
const INSPECTED: &[&str] = &["质检中", "包装中", "待发货"];
const DELIVERY_METHODS: &[&str] = &["标准配送", "加急配送", "专人配送", "自提"];
const NAMES: &[&str] = &["张三", "李四", "王五", "赵六", "钱七", "孙八"];
const STUDIOS: &[&str] = &["创新", "卓越", "精品", "匠心"];
const SURNAMES: &[&str] = &["张", "李", "王", "刘"];
const ROLES: &[&str] = &["设计师", "项目经理", "采购经理"];

const PRODUCT_TYPES: &[&str] = &["高端手表", "定制珠宝", "手工皮具", "艺术陶瓷", "木制工艺品", "金属制品"];
const MATERIALS: &[&str] = &["不锈钢", "纯银", "真皮", "陶瓷", "钛合金", "贵金属"];
const COLOR_SCHEMES: &[&str] = &["经典黑金", "玫瑰金", "铂金银", "双色搭配", "彩色镶嵌", "透明质感"];
const FINISHES: &[&str] = &["抛光", "拉丝", "雕刻", "镶嵌", "镀层", "复合工艺"];
const FEATURES: &[&str] = &["防水", "防磁", "计时", "存储", "装饰", "实用"];
const PACKAGING: &[&str] = &["精美礼盒", "定制包装", "环保材料", "奢华包装", "简约包装"];
const EXTRA_SERVICES: &[&str] = &["刻字", "证书", "保养", "延保", "礼品卡", "个性化卡片"];

/// Stage, status and days after the order date it is expected, `None` meaning the order date.
const SCHEDULE: [(&str, &str, Option<i64>); 6] = [
    ("设计确认", "已确认", None),
    ("物料采购", "进行中", Some(1)),
    ("样品制作", "待开始", Some(3)),
    ("批量生产", "待开始", Some(7)),
    ("质量检验", "待开始", Some(12)),
    ("包装发货", "待开始", Some(14)),
];

const QUALITY_STANDARDS: [(&str, &str); 6] = [
    ("外观检查", "表面光滑无瑕疵，颜色均匀一致"),
    ("尺寸精度", "误差范围±0.1mm"),
    ("材质检测", "符合环保标准，无有害物质"),
    ("耐用性测试", "通过10万次耐磨测试"),
    ("安全检测", "通过国际安全认证"),
    ("包装检查", "防震防潮包装完整"),
];

const SERVICE_TERMS: [&str; 6] = [
    "• 定制产品一经确认，不可随意更改设计",
    "• 客户需对提供的设计素材版权负责",
    "• 质量问题在收货后7天内可申请售后",
    "• 定制产品不适用7天无理由退货政策",
    "• 版权归客户所有，制造商保留展示权",
    "• 交付时间根据定制复杂程度可能调整",
];

const PREVIEW_FRAME: [&str; 4] = [
    "┌────────────────────────────┐",
    "│        [设计图占位符]        │",
    "└────────────────────────────┘",
    "客户确认签字: ____________",
];

fn customization<R: Rng + ?Sized>(rng: &mut R) -> CustomizationDetails {
    CustomizationDetails {
        product_type: pick(rng, PRODUCT_TYPES).to_string(),
        material: pick(rng, MATERIALS).to_string(),
        color_scheme: pick(rng, COLOR_SCHEMES).to_string(),
        dimensions: format!(
            "{}mm × {}mm × {}mm",
            rng.gen_range(20..=100),
            rng.gen_range(20..=100),
            rng.gen_range(5..=30)
        ),
        finish: pick(rng, FINISHES).to_string(),
        feature: pick(rng, FEATURES).to_string(),
        packaging: pick(rng, PACKAGING).to_string(),
        extra_service: pick(rng, EXTRA_SERVICES).to_string(),
    }
}

pub fn generate(order_id: &str, ctx: &mut GenerationContext) -> (RgbImage, OrderRecord) {
    let now = ctx.now;
    let rng = &mut ctx.rng;

    let customization_level = pick(rng, LEVELS).to_string();
    let ordered_at = days_before(now, rng, 1..=30);
    let production_status = pick(rng, PRODUCTION_STATUSES).to_string();
    let delivery_method = pick(rng, DELIVERY_METHODS).to_string();
    let customer = CustomizedCustomer {
        name: format!("客户{}", pick(rng, NAMES)),
        company: format!("{}定制有限公司", pick(rng, STUDIOS)),
        contact_person: format!("{}{}", pick(rng, SURNAMES), pick(rng, ROLES)),
        phone: format!("139-{}-{}", rng.gen_range(1000..=9999), rng.gen_range(1000..=9999)),
        email: format!("custom{}@custom.com", rng.gen_range(1000..=9999)),
    };
    let details = customization(rng);

    let production_schedule: Vec<ScheduleStage> = SCHEDULE
        .iter()
        .map(|(stage, status, offset)| {
            let expected = match offset {
                Some(days) => now + Duration::days(*days),
                None => ordered_at,
            };
            ScheduleStage {
                stage: stage.to_string(),
                status: status.to_string(),
                expected_date: expected.format(DATE).to_string(),
            }
        })
        .collect();

    let inspected = INSPECTED.contains(&production_status.as_str());
    let quality_checks: Vec<QualityCheck> = QUALITY_STANDARDS
        .iter()
        .map(|(standard, description)| QualityCheck {
            standard: standard.to_string(),
            description: description.to_string(),
            passed: inspected.then(|| chance(rng, 0.5)),
        })
        .collect();

    let design_cost = money_between(rng, 500.0, 3000.0);
    let material_cost = money_between(rng, 1000.0, 8000.0);
    let production_cost = money_between(rng, 800.0, 5000.0);
    let packaging_cost = money_between(rng, 100.0, 500.0);
    let shipping_cost = money_between(rng, 50.0, 300.0);
    let item_amount = sum_cents([design_cost, material_cost, production_cost, packaging_cost]);
    let tax = round2(item_amount * TAX_RATE);
    let total_cost = sum_cents([item_amount, shipping_cost, tax]);
    let items = vec![CustomizedItem {
        name: details.product_type.clone(),
        specification: details.dimensions.clone(),
        quantity: 1,
        amount: item_amount,
    }];

    let yuan = Currency::YUAN;
    let width = WIDTH as i32;
    let mut canvas = ctx.canvas(WIDTH, HEIGHT);

    canvas.rect(Rect::band(WIDTH, 0, 140), Some(HEADER), Some(HEADER), 1);
    canvas.text(50, 30, "匠心定制 - 个性化解决方案", 32.0, WHITE);
    canvas.text(50, 75, "专业设计 · 精工制造 · 个性体验", 16.0, WHITE);
    canvas.text(width - 300, 35, &format!("定制订单 #{order_id}"), 16.0, WHITE);
    canvas.text(
        width - 300,
        65,
        &format!("定制等级: {customization_level}"),
        14.0,
        WHITE,
    );
    canvas.text(width - 300, 85, &format!("生产状态: {production_status}"), 14.0, WHITE);

    let mut y = 160;
    canvas.rect(Rect::new(50, y, width - 50, y + 210), Some(STRIPE_LIGHT), Some(RULE), 1);
    canvas.text(70, y + 15, "客户及项目信息", 24.0, HEADING);
    let fields = [
        ("客户名称:", customer.name.as_str()),
        ("公司名称:", customer.company.as_str()),
        ("项目联系人:", customer.contact_person.as_str()),
        ("联系电话:", customer.phone.as_str()),
        ("电子邮箱:", customer.email.as_str()),
        ("交付方式:", delivery_method.as_str()),
    ];
    FieldList::new(90, 250, 25).draw(&mut canvas, y + 50, &fields);
    y += 230;

    canvas.text(50, y, "定制需求详情", 20.0, HEADING);
    y += 40;
    let options: Vec<(String, &str)> = details
        .entries()
        .iter()
        .map(|(label, value)| (format!("{label}:"), *value))
        .collect();
    y = FieldList::new(90, 250, 30).draw(&mut canvas, y, &options);

    y += 20;
    canvas.rect(Rect::new(70, y, width - 70, y + 150), Some(PREVIEW_FILL), Some(PREVIEW_EDGE), 1);
    canvas.text(90, y + 15, "设计稿预览", 24.0, HEADING);
    bullet_list(&mut canvas, 110, y + 50, 20, 12.0, MUTED, &PREVIEW_FRAME);
    canvas.text(90, y + 125, "* 设计稿已通过客户确认", 14.0, CONFIRMED);
    y += 170;

    canvas.text(50, y, "生产进度计划", 20.0, HEADING);
    y += 40;
    let schedule_table = Table::new(70, width - 70, 90, &[200, 150, 150])
        .with_header(35, SLATE, WHITE)
        .with_row_height(35);
    y = schedule_table.draw_header(&mut canvas, y, &["生产阶段", "状态", "预计日期"]);
    let rows: Vec<Vec<&str>> = production_schedule
        .iter()
        .map(|stage| vec![stage.stage.as_str(), stage.status.as_str(), stage.expected_date.as_str()])
        .collect();
    y = schedule_table.draw_rows(&mut canvas, y, &rows);

    y += 20;
    canvas.text(50, y, "质量检测标准", 20.0, HEADING);
    y += 40;
    let checks: Vec<String> = quality_checks
        .iter()
        .map(|check| {
            let verdict = match check.passed {
                Some(true) => " [通过]",
                Some(false) => " [未通过]",
                None => "",
            };
            format!("• {}: {}{verdict}", check.standard, check.description)
        })
        .collect();
    y = bullet_list(&mut canvas, 90, y, 28, 14.0, INK, &checks);

    y += 20;
    canvas.text(50, y, "定制商品", 20.0, HEADING);
    y += 40;
    let item_table = Table::new(70, width - 70, 90, &[260, 300, 100, 150])
        .with_header(35, SLATE, WHITE)
        .with_row_height(35);
    y = item_table.draw_header(&mut canvas, y, &["商品名称", "规格", "数量", "金额"]);
    let item_rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            vec![
                item.name.clone(),
                item.specification.clone(),
                item.quantity.to_string(),
                yuan.grouped(item.amount),
            ]
        })
        .collect();
    y = item_table.draw_rows(&mut canvas, y, &item_rows);

    y += 20;
    canvas.text(50, y, "成本明细", 20.0, HEADING);
    y += 40;
    let cost_table = Table::new(70, width / 2, 90, &[260, 150])
        .with_header(35, SLATE, WHITE)
        .with_row_height(35);
    y = cost_table.draw_header(&mut canvas, y, &["费用项目", "金额"]);
    let costs = [
        ("设计费用", design_cost),
        ("材料费用", material_cost),
        ("生产费用", production_cost),
        ("包装费用", packaging_cost),
        ("税费(13%)", tax),
        ("运费", shipping_cost),
        ("总计", total_cost),
    ];
    let cost_rows: Vec<Vec<String>> = costs
        .iter()
        .map(|(label, amount)| vec![label.to_string(), yuan.grouped(*amount)])
        .collect();
    y = cost_table.draw_rows(&mut canvas, y, &cost_rows);

    y += 30;
    canvas.text(50, y, "定制服务条款", 20.0, HEADING);
    y += 40;
    y = bullet_list(&mut canvas, 90, y, 25, 14.0, MUTED, &SERVICE_TERMS);

    y += 40;
    canvas.rect(Rect::new(70, y, width - 70, y + 100), Some(STRIPE_LIGHT), Some(RULE), 1);
    canvas.text(90, y + 15, "匠心定制 - 为您打造独一无二的产品", 16.0, BLACK);
    let footer = [
        format!("客服: custom@craftsmanship.com | 订单 #{order_id} | 定制等级: {customization_level}"),
        "地址: 北京市朝阳区创意园区A座 | 电话: 400-123-定制".to_owned(),
    ];
    bullet_list(&mut canvas, 90, y + 45, 25, 14.0, MUTED, &footer);

    let record = CustomizedOrder {
        order_id: order_id.to_owned(),
        order_type: ORDER_TYPE.to_owned(),
        customization_level,
        order_date: ordered_at.format(DATE_TIME).to_string(),
        production_status,
        delivery_method,
        customer_info: customer,
        customization_details: details,
        production_schedule,
        quality_checks,
        items,
        design_cost,
        material_cost,
        production_cost,
        total_cost,
        packaging_cost,
        shipping_cost,
        tax,
    };

    (canvas.finish(), OrderRecord::Customized(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::test_support::context;
    use crate::templates::Locale;

    fn record(seed: u64) -> CustomizedOrder {
        match generate("CXORD0005", &mut context(seed, Locale::Chinese)).1 {
            OrderRecord::Customized(record) => record,
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn costs_roll_up_into_total() {
        for seed in 0..30 {
            let order = record(seed);
            let parts = sum_cents([
                order.design_cost,
                order.material_cost,
                order.production_cost,
                order.packaging_cost,
            ]);
            assert_eq!(order.items.len(), 1);
            assert_eq!(order.items[0].amount, parts);
            assert_eq!(order.items[0].name, order.customization_details.product_type);
            assert_eq!(order.items[0].specification, order.customization_details.dimensions);
            assert_eq!(order.items[0].quantity, 1);
            assert_eq!(order.tax, round2(parts * TAX_RATE));
            assert_eq!(order.total_cost, sum_cents([parts, order.shipping_cost, order.tax]));
            assert_eq!(order.order_type, ORDER_TYPE);
        }
    }

    #[test]
    fn quality_results_only_after_inspection() {
        for seed in 0..40 {
            let order = record(seed);
            let inspected = INSPECTED.contains(&order.production_status.as_str());
            assert_eq!(order.quality_checks.len(), 6);
            for check in &order.quality_checks {
                assert_eq!(check.passed.is_some(), inspected);
            }
        }
    }

    #[test]
    fn schedule_is_anchored_on_order_and_clock() {
        let order = record(11);
        let dates: Vec<&str> = order
            .production_schedule
            .iter()
            .map(|stage| stage.expected_date.as_str())
            .collect();
        assert_eq!(dates[0], &order.order_date[..10]);
        assert_eq!(&dates[1..], ["2026-01-27", "2026-01-29", "2026-02-02", "2026-02-07", "2026-02-09"]);
        assert_eq!(order.production_schedule[0].status, "已确认");
    }

    #[test]
    fn dimensions_follow_the_pattern() {
        let order = record(6);
        let parts: Vec<&str> = order.customization_details.dimensions.split(" × ").collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|part| part.ends_with("mm")));
    }
}
