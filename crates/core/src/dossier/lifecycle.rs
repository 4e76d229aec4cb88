//! Status display tables and the main-path timeline.
//!
//! Every known status carries a label, a color category, a fixed order
//! position (1-20) and, for most statuses, an explicit progress percentage.
//! Progress is resolved in two ordered steps: the explicit table first, then
//! the order-based formula. The explicit table deliberately disagrees with
//! the formula for branch statuses (appeals, referrals, rejection).
//!
//! Unknown codes never fail: they get [`ColorClass::Unknown`], their own code
//! as label, order 0 and progress 0. Legacy case records still carry codes
//! that predate the current enumeration.

use std::sync::LazyLock;

use serde::Serialize;

use super::status::DossierStatus;

/// Display color category of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorClass {
    Info,
    Pending,
    Progress,
    Warning,
    Success,
    Danger,
    Appeal,
    Neutral,
    /// Fallback for codes outside the enumeration.
    Unknown,
}

impl ColorClass {
    /// Utility classes the frontend applies to the status badge.
    pub fn css_class(self) -> &'static str {
        match self {
            ColorClass::Info => "bg-blue-100 text-blue-800",
            ColorClass::Pending => "bg-yellow-100 text-yellow-800",
            ColorClass::Progress => "bg-indigo-100 text-indigo-800",
            ColorClass::Warning => "bg-orange-100 text-orange-800",
            ColorClass::Success => "bg-green-100 text-green-800",
            ColorClass::Danger => "bg-red-100 text-red-800",
            ColorClass::Appeal => "bg-purple-100 text-purple-800",
            ColorClass::Neutral => "bg-gray-100 text-gray-800",
            ColorClass::Unknown => "bg-gray-100 text-gray-500",
        }
    }
}

/// One row of the lifecycle table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEntry {
    pub status: DossierStatus,
    /// Relative position in the workflow (1-based).
    pub order: u8,
    pub label: &'static str,
    pub color: ColorClass,
    /// Explicit progress percentage. `None` falls through to the formula.
    pub progress: Option<u8>,
}

const fn entry(
    status: DossierStatus,
    order: u8,
    label: &'static str,
    color: ColorClass,
    progress: Option<u8>,
) -> StatusEntry {
    StatusEntry {
        status,
        order,
        label,
        color,
        progress,
    }
}

const STANDARD_ENTRIES: [StatusEntry; 20] = [
    entry(DossierStatus::Received, 1, "Reçu", ColorClass::Info, Some(5)),
    entry(
        DossierStatus::AwaitingOnboarding,
        2,
        "En attente d'onboarding",
        ColorClass::Pending,
        Some(10),
    ),
    entry(DossierStatus::Accepted, 3, "Accepté", ColorClass::Info, Some(15)),
    entry(
        DossierStatus::UnderInstruction,
        4,
        "En cours d'instruction",
        ColorClass::Progress,
        Some(25),
    ),
    entry(
        DossierStatus::MissingDocuments,
        5,
        "Pièces manquantes",
        ColorClass::Warning,
        None,
    ),
    entry(
        DossierStatus::Complete,
        6,
        "Dossier complet",
        ColorClass::Progress,
        Some(40),
    ),
    entry(DossierStatus::Filed, 7, "Déposé", ColorClass::Progress, Some(50)),
    entry(
        DossierStatus::ReceiptConfirmed,
        8,
        "Accusé de réception",
        ColorClass::Progress,
        Some(60),
    ),
    entry(
        DossierStatus::SupplementRequested,
        9,
        "Complément demandé",
        ColorClass::Warning,
        Some(65),
    ),
    entry(
        DossierStatus::FavorableDecision,
        10,
        "Décision favorable",
        ColorClass::Success,
        Some(100),
    ),
    entry(
        DossierStatus::UnfavorableDecision,
        11,
        "Décision défavorable",
        ColorClass::Danger,
        Some(80),
    ),
    entry(
        DossierStatus::GroundsCommunicated,
        12,
        "Communication des motifs",
        ColorClass::Warning,
        Some(82),
    ),
    entry(
        DossierStatus::AppealInPreparation,
        13,
        "Recours en préparation",
        ColorClass::Appeal,
        Some(85),
    ),
    entry(
        DossierStatus::InterimMeasuresReferral,
        14,
        "Référé mesures utiles",
        ColorClass::Appeal,
        Some(88),
    ),
    entry(
        DossierStatus::SuspensionReferral,
        15,
        "Référé suspension",
        ColorClass::Appeal,
        Some(90),
    ),
    entry(
        DossierStatus::CaseWon,
        16,
        "Gain de cause",
        ColorClass::Success,
        Some(100),
    ),
    entry(DossierStatus::Rejected, 17, "Rejet", ColorClass::Danger, Some(95)),
    entry(DossierStatus::Refused, 18, "Refusé", ColorClass::Danger, Some(0)),
    entry(DossierStatus::Cancelled, 19, "Annulé", ColorClass::Neutral, Some(0)),
    entry(DossierStatus::Other, 20, "Autre", ColorClass::Neutral, Some(0)),
];

/// Statuses shown as steps in the client-facing progress timeline.
const MAIN_PATH: [DossierStatus; 8] = [
    DossierStatus::Received,
    DossierStatus::AwaitingOnboarding,
    DossierStatus::Accepted,
    DossierStatus::UnderInstruction,
    DossierStatus::Complete,
    DossierStatus::Filed,
    DossierStatus::ReceiptConfirmed,
    DossierStatus::FavorableDecision,
];

/// Statuses whose order bounds the progress formula denominator.
const MAX_ORDER_ANCHORS: [DossierStatus; 3] = [
    DossierStatus::FavorableDecision,
    DossierStatus::CaseWon,
    DossierStatus::Rejected,
];

static STANDARD: LazyLock<LifecycleTable> = LazyLock::new(|| LifecycleTable {
    entries: STANDARD_ENTRIES.to_vec(),
    main_path: MAIN_PATH.to_vec(),
    max_order_anchors: MAX_ORDER_ANCHORS.to_vec(),
    unknown_color: ColorClass::Unknown,
});

/// A single step of the main-path timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    pub key: DossierStatus,
    pub label: &'static str,
    pub order: u8,
    pub completed: bool,
    pub is_current: bool,
}

/// Everything the UI needs to render one status badge and progress bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusDisplay {
    pub code: String,
    pub label: String,
    pub color: ColorClass,
    pub css_class: &'static str,
    pub order: u8,
    pub progress: u8,
    /// `false` when the code is outside the enumeration and defaults were used.
    pub known: bool,
}

/// Immutable status tables.
///
/// [`LifecycleTable::standard`] is the production table. Tests build their own
/// tables to probe the progress policy at boundary values.
#[derive(Debug, Clone)]
pub struct LifecycleTable {
    pub entries: Vec<StatusEntry>,
    pub main_path: Vec<DossierStatus>,
    pub max_order_anchors: Vec<DossierStatus>,
    pub unknown_color: ColorClass,
}

impl LifecycleTable {
    /// The production lifecycle table.
    pub fn standard() -> &'static LifecycleTable {
        &STANDARD
    }

    /// Look up the table row for a status code.
    pub fn entry(&self, code: &str) -> Option<&StatusEntry> {
        let status = DossierStatus::from_code(code)?;
        self.entries.iter().find(|e| e.status == status)
    }

    pub fn color_for(&self, code: &str) -> ColorClass {
        self.entry(code).map_or(self.unknown_color, |e| e.color)
    }

    /// Label for `code`, or `code` itself when unmapped.
    pub fn label_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.entry(code).map_or(code, |e| e.label)
    }

    /// Order position of `code`; 0 when unmapped.
    pub fn order_of(&self, code: &str) -> u8 {
        self.entry(code).map_or(0, |e| e.order)
    }

    /// Denominator of the progress formula.
    pub fn max_order(&self) -> u8 {
        self.max_order_anchors
            .iter()
            .map(|s| self.order_of(s.as_str()))
            .max()
            .unwrap_or(0)
    }

    /// Progress percentage in `[0, 100]`.
    ///
    /// Resolution order:
    /// 1. refused / cancelled always yield 0;
    /// 2. an explicit table value wins;
    /// 3. otherwise `round(100 * order / max_order)`, 0 for unknown codes.
    pub fn progress_for(&self, code: &str) -> u8 {
        if DossierStatus::from_code(code).is_some_and(DossierStatus::is_negative_terminal) {
            return 0;
        }

        if let Some(progress) = self.entry(code).and_then(|e| e.progress) {
            return progress.min(100);
        }

        let order = self.order_of(code);
        let max_order = self.max_order();
        if order == 0 || max_order == 0 {
            return 0;
        }

        let percent = (100.0 * f64::from(order) / f64::from(max_order)).round();
        percent.min(100.0) as u8
    }

    /// Main-path steps annotated against the current status.
    ///
    /// A step is `completed` when its order is at or before the current
    /// status's order, and `is_current` when the orders are equal. For an
    /// unknown code (order 0) no step is completed.
    pub fn timeline_for(&self, code: &str) -> Vec<TimelineStep> {
        let current = self.order_of(code);
        self.main_path
            .iter()
            .filter_map(|status| self.entries.iter().find(|e| e.status == *status))
            .map(|e| TimelineStep {
                key: e.status,
                label: e.label,
                order: e.order,
                completed: current > 0 && e.order <= current,
                is_current: current > 0 && e.order == current,
            })
            .collect()
    }

    pub fn describe(&self, code: &str) -> StatusDisplay {
        let color = self.color_for(code);
        StatusDisplay {
            code: code.to_string(),
            label: self.label_for(code).to_string(),
            color,
            css_class: color.css_class(),
            order: self.order_of(code),
            progress: self.progress_for(code),
            known: self.entry(code).is_some(),
        }
    }
}

/// [`LifecycleTable::color_for`] on the standard table.
pub fn color_for(code: &str) -> ColorClass {
    LifecycleTable::standard().color_for(code)
}

/// [`LifecycleTable::label_for`] on the standard table.
pub fn label_for(code: &str) -> &str {
    LifecycleTable::standard().label_for(code)
}

/// [`LifecycleTable::progress_for`] on the standard table.
pub fn progress_for(code: &str) -> u8 {
    LifecycleTable::standard().progress_for(code)
}

/// [`LifecycleTable::order_of`] on the standard table.
pub fn order_of(code: &str) -> u8 {
    LifecycleTable::standard().order_of(code)
}

/// [`LifecycleTable::timeline_for`] on the standard table.
pub fn timeline_for(code: &str) -> Vec<TimelineStep> {
    LifecycleTable::standard().timeline_for(code)
}

/// [`LifecycleTable::describe`] on the standard table.
pub fn describe(code: &str) -> StatusDisplay {
    LifecycleTable::standard().describe(code)
}
