//! Localized labels and chart palettes

use paydash_core::Locale;

/// Every user-visible string of the overview panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSet {
    /// Revenue section title
    pub revenue_title: &'static str,
    /// Revenue bucket labels, in bucket order
    pub revenue_buckets: [&'static str; 5],
    /// Revenue dataset label
    pub revenue_dataset: &'static str,
    /// Status section title
    pub status_title: &'static str,
    /// Status labels (success, pending, cancelled)
    pub statuses: [&'static str; 3],
    /// Status dataset label
    pub status_dataset: &'static str,
    /// Conversion section title
    pub conversion_title: &'static str,
    /// Pie slice labels (buyers, non-buyers)
    pub conversion_slices: [&'static str; 2],
    /// Conversion dataset label
    pub conversion_dataset: &'static str,
    /// Caption in front of the user count
    pub total_users: &'static str,
    /// Caption in front of the buyer count
    pub buyers: &'static str,
}

const VI: LabelSet = LabelSet {
    revenue_title: "Tổng doanh thu",
    revenue_buckets: ["Hôm nay", "Hôm qua", "Tuần này", "Tháng này", "Tổng cộng"],
    revenue_dataset: "Doanh thu (VND)",
    status_title: "Số lượng giao dịch",
    statuses: ["Đã hoàn tất", "Đang xử lý", "Bị hủy"],
    status_dataset: "Số lượng giao dịch",
    conversion_title: "Tỷ lệ chuyển đổi",
    conversion_slices: ["Người đã mua", "Người chưa mua"],
    conversion_dataset: "Tỷ lệ chuyển đổi (%)",
    total_users: "Tổng số User",
    buyers: "Tổng số Người đã nạp",
};

const EN: LabelSet = LabelSet {
    revenue_title: "Total revenue",
    revenue_buckets: ["Today", "Yesterday", "This week", "This month", "Total"],
    revenue_dataset: "Revenue (VND)",
    status_title: "Transactions",
    statuses: ["Completed", "Processing", "Cancelled"],
    status_dataset: "Transactions",
    conversion_title: "Conversion rate",
    conversion_slices: ["Buyers", "Non-buyers"],
    conversion_dataset: "Conversion rate (%)",
    total_users: "Total users",
    buyers: "Total buyers",
};

/// Label set for a locale
#[must_use]
pub const fn labels(locale: Locale) -> &'static LabelSet {
    match locale {
        Locale::Vi => &VI,
        Locale::En => &EN,
    }
}

/// Fill and border colors, one pair per data point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette<const N: usize> {
    /// Fill colors
    pub background: [&'static str; N],
    /// Border colors
    pub border: [&'static str; N],
}

/// Revenue buckets
pub const REVENUE_PALETTE: Palette<5> = Palette {
    background: ["#ff6384", "#36a2eb", "#ffce56", "#4caf50", "#9c27b0"],
    border: ["#d32f2f", "#1976d2", "#ffa000", "#388e3c", "#7b1fa2"],
};

/// Success, pending, cancelled
pub const STATUS_PALETTE: Palette<3> = Palette {
    background: ["#4caf50", "#ff9800", "#f44336"],
    border: ["#388e3c", "#f57c00", "#d32f2f"],
};

/// Buyers, non-buyers
pub const CONVERSION_PALETTE: Palette<2> = Palette {
    background: ["#4caf50", "#f44336"],
    border: ["#388e3c", "#d32f2f"],
};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_vietnamese_is_the_default_label_set() {
        let vi = labels(Locale::default());
        assert_eq!(vi.revenue_buckets[0], "Hôm nay");
        assert_eq!(vi.statuses, ["Đã hoàn tất", "Đang xử lý", "Bị hủy"]);
        assert_eq!(vi.conversion_dataset, "Tỷ lệ chuyển đổi (%)");
    }

    #[test]
    fn test_label_sets_differ_per_locale() {
        assert_ne!(labels(Locale::Vi), labels(Locale::En));
        assert_eq!(labels(Locale::En).revenue_buckets[4], "Total");
    }
}
