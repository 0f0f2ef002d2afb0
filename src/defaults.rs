//! Compiled-in default strings.
//!
//! These tables are complete for every language: each [`StringKey`] maps to a
//! non-empty value, so they can always back a missing cached entry.

use std::sync::LazyLock;

use crate::types::{
    LanguageCode,
    StringKey,
    StringTable,
};

/// Complete English table
static ENGLISH_DEFAULTS: LazyLock<StringTable> =
    LazyLock::new(|| build_table(LanguageCode::En));

/// Complete Vietnamese table
static VIETNAMESE_DEFAULTS: LazyLock<StringTable> =
    LazyLock::new(|| build_table(LanguageCode::Vn));

/// Default table for `language`.
#[must_use]
pub fn default_table(language: LanguageCode) -> &'static StringTable {
    match language {
        LanguageCode::En => &*ENGLISH_DEFAULTS,
        LanguageCode::Vn => &*VIETNAMESE_DEFAULTS,
    }
}

/// Default value for one key.
#[must_use]
pub const fn default_string(language: LanguageCode, key: StringKey) -> &'static str {
    match language {
        LanguageCode::En => english(key),
        LanguageCode::Vn => vietnamese(key),
    }
}

/// Collects every default for `language` into a table.
fn build_table(language: LanguageCode) -> StringTable {
    StringTable::from_pairs(StringKey::ALL.iter().map(|key| (*key, default_string(language, *key))))
}

/// English defaults.
const fn english(key: StringKey) -> &'static str {
    match key {
        StringKey::Hello => "Hello,",
        StringKey::NoticeBoard => "Notice Board",
        StringKey::ViewMore => "View more",
        StringKey::UpcomingEvent => "Upcoming Event",
        StringKey::ExamArchive => "Exam Archive",
        StringKey::Notifications => "Notifications",
        StringKey::All => "All",
        StringKey::Unread => "Unread",
        StringKey::NoUnreadNotices => "No unread notices",
        StringKey::NoNotices => "No notices",
        StringKey::Back => "Back",
        StringKey::Placeholder => "Search...",
        StringKey::AcademicAffairs => "Academic Affairs",
        StringKey::Research => "Research",
        StringKey::Events | StringKey::NavEvents => "Events",
        StringKey::General => "General",
        StringKey::NavHome => "Home",
        StringKey::NavNotices => "Notices",
        StringKey::NavExams => "Exams",
        StringKey::Login => "Log in",
        StringKey::Logout => "Log out",
        StringKey::Settings => "Settings",
        StringKey::Language => "Language",
        StringKey::UploadPaper => "Upload paper",
        StringKey::Loading => "Loading...",
    }
}

/// Vietnamese defaults.
const fn vietnamese(key: StringKey) -> &'static str {
    match key {
        StringKey::Hello => "Xin chào,",
        StringKey::NoticeBoard => "Bảng thông báo",
        StringKey::ViewMore => "Xem thêm",
        StringKey::UpcomingEvent => "Sự kiện sắp tới",
        StringKey::ExamArchive => "Kho đề thi",
        StringKey::Notifications | StringKey::NavNotices => "Thông báo",
        StringKey::All => "Tất cả",
        StringKey::Unread => "Chưa đọc",
        StringKey::NoUnreadNotices => "Không có thông báo chưa đọc",
        StringKey::NoNotices => "Không có thông báo",
        StringKey::Back => "Quay lại",
        StringKey::Placeholder => "Tìm kiếm...",
        StringKey::AcademicAffairs => "Học vụ",
        StringKey::Research => "Nghiên cứu",
        StringKey::Events | StringKey::NavEvents => "Sự kiện",
        StringKey::General => "Chung",
        StringKey::NavHome => "Trang chủ",
        StringKey::NavExams => "Đề thi",
        StringKey::Login => "Đăng nhập",
        StringKey::Logout => "Đăng xuất",
        StringKey::Settings => "Cài đặt",
        StringKey::Language => "Ngôn ngữ",
        StringKey::UploadPaper => "Tải đề thi lên",
        StringKey::Loading => "Đang tải...",
    }
}
