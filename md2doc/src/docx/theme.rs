//! Fixed typographic theme.

use super::nodes::Spacing;

pub mod fonts {
    pub const CJK: &str = "Microsoft JhengHei";
    pub const LATIN: &str = "Consolas";
}

/// Half-point sizes.
pub mod sizes {
    pub const BODY: u32 = 22;
    pub const CODE: u32 = 18;
    pub const LABEL: u32 = 18;
    pub const SHORTCUT: u32 = 20;
    pub const H1: u32 = 32;
    pub const H2: u32 = 28;
    pub const H3: u32 = 24;
    pub const HINT: u32 = 16;
}

pub mod colors {
    pub const BLACK: &str = "000000";
    pub const WHITE: &str = "FFFFFF";
    pub const PRIMARY_BLUE: &str = "1E3A8A";
    pub const LINK_BLUE: &str = "2563EB";
    pub const ERROR_RED: &str = "FF0000";
    pub const HINT_GREY: &str = "666666";
    pub const LINE_NUMBER: &str = "94A3B8";

    pub const BG_CODE: &str = "F1F5F9";
    pub const BG_BUTTON: &str = "E2E8F0";
    pub const BG_SHORTCUT: &str = "F8FAFC";
    pub const BG_AI_CHAT: &str = "F2F2F2";

    pub const CHAT_BORDER: &str = "404040";
    pub const CODE_BORDER: &str = "BFBFBF";

    /// Border and background per callout kind.
    pub const CALLOUT_TIP: (&str, &str) = ("64748B", "F9FAFB");
    pub const CALLOUT_NOTE: (&str, &str) = ("CBD5E1", "FFFFFF");
    pub const CALLOUT_WARNING: (&str, &str) = ("000000", "F1F5F9");
}

pub mod spacing {
    use super::Spacing;

    pub const PARAGRAPH: Spacing = Spacing::new(200, 200);
    pub const H1: Spacing = Spacing::new(480, 240);
    pub const H2: Spacing = Spacing::new(400, 200);
    pub const H3: Spacing = Spacing::new(300, 150);
    pub const CODE: Spacing = Spacing::with_line(600, 600, 300);
    pub const CHAT: Spacing = Spacing::with_line(400, 400, super::line::ONE_POINT_TWO);
    pub const CALLOUT: Spacing = Spacing::with_line(600, 600, super::line::ONE_POINT_FIVE);
    pub const LIST: Spacing = Spacing::new(120, 120);
    pub const TABLE_AFTER: Spacing = Spacing::new(240, 0);
    pub const HR: Spacing = Spacing::new(240, 240);
    pub const TOC_TITLE: Spacing = Spacing::new(480, 480);
    pub const TOC_ENTRY: Spacing = Spacing::new(120, 120);
    pub const DIAGRAM: Spacing = Spacing::new(400, 400);
    pub const DIAGRAM_ERROR: Spacing = Spacing::new(200, 200);
    pub const NONE: Spacing = Spacing::new(0, 0);
}

pub mod line {
    pub const ONE_POINT_TWO: u32 = 276;
    pub const ONE_POINT_FIVE: u32 = 360;
}

pub mod indent {
    pub const CODE: u32 = 400;
    pub const CHAT: u32 = 1440;
    pub const CHAT_CENTER: u32 = 720;
    pub const CALLOUT: u32 = 400;
}

/// Eighths of a point.
pub mod border {
    pub const H1_BOTTOM: u32 = 18;
    pub const CODE: u32 = 6;
    pub const CHAT: u32 = 4;
    pub const TABLE: u32 = 4;
    pub const CALLOUT_TIP: u32 = 36;
    pub const CALLOUT_WARNING: u32 = 48;
    pub const CALLOUT_NOTE: u32 = 24;
    pub const HR: u32 = 12;
}

pub mod layout {
    pub const TWIPS_PER_CM: f64 = 567.0;
    pub const MARGIN: u32 = 1440;
    pub const LINE_NUMBER_COLUMN: u32 = 600;
    pub const CODE_PADDING_ROW: u32 = 120;
    pub const TABLE_CELL_MARGIN: u32 = 100;
    pub const QR_SIZE_PX: u32 = 60;
}
