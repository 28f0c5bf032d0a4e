use std::sync::OnceLock;

use clap::ValueEnum;

/// Month keys under `months.` in the locale files, January first.
const MONTH_KEYS: [&str; 12] = [
    "months.january",
    "months.february",
    "months.march",
    "months.april",
    "months.may",
    "months.june",
    "months.july",
    "months.august",
    "months.september",
    "months.october",
    "months.november",
    "months.december",
];

/// Display language of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    /// Locale code as used by the files under `locales/`.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }

    /// Labels for this locale, read from the translation tables once.
    pub fn labels(self) -> &'static Labels {
        static EN: OnceLock<Labels> = OnceLock::new();
        static RU: OnceLock<Labels> = OnceLock::new();
        let cell = match self {
            Locale::En => &EN,
            Locale::Ru => &RU,
        };
        cell.get_or_init(|| Labels::load(self))
    }
}

/// Every user-facing string of the dashboard for one locale.
#[derive(Debug)]
pub struct Labels {
    pub months: [String; 12],
    pub yearly_plan: String,
    pub actual_cumulative: String,
    pub plan_for_month: String,
    pub actual_for_month: String,
    pub item_axis: String,
    pub value_axis: String,
    pub no_data: String,
    pub item_placeholder: String,
    pub all_items: String,
    pub heading: String,
    pub subheading: String,
    /// `%{month}` placeholder.
    title_template: String,
    /// `%{id}` placeholder.
    item_template: String,
}

impl Labels {
    fn load(locale: Locale) -> Self {
        let code = locale.code();
        let t = |key: &str| rust_i18n::t!(key, locale = code).to_string();
        Labels {
            months: MONTH_KEYS.map(|key| t(key)),
            yearly_plan: t("chart.yearly_plan"),
            actual_cumulative: t("chart.actual_cumulative"),
            plan_for_month: t("chart.plan_for_month"),
            actual_for_month: t("chart.actual_for_month"),
            item_axis: t("chart.item_axis"),
            value_axis: t("chart.value_axis"),
            no_data: t("chart.no_data"),
            item_placeholder: t("selector.item_placeholder"),
            all_items: t("selector.all_items"),
            heading: t("dashboard.heading"),
            subheading: t("dashboard.subheading"),
            title_template: t("chart.title"),
            item_template: t("selector.item_option"),
        }
    }

    /// Name of a 1-based month, `None` outside 1–12.
    pub fn month_name(&self, month: u32) -> Option<&str> {
        let idx = usize::try_from(month).ok()?.checked_sub(1)?;
        self.months.get(idx).map(String::as_str)
    }

    /// Chart title for a month name.
    pub fn chart_title(&self, month_name: &str) -> String {
        self.title_template.replace("%{month}", month_name)
    }

    pub fn item_label(&self, item_id: &impl std::fmt::Display) -> String {
        self.item_template.replace("%{id}", &item_id.to_string())
    }
}
