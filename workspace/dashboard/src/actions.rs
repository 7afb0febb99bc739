use tracing::debug;

/// Discrete user actions available on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickAction {
    AcknowledgeDashboard,
    OpenAnalytics,
    OpenRiskSettings,
    OpenProfile,
    UploadStatement,
    AddExpense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
}

/// Fire-and-forget message emitted for a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: &'static str,
    pub detail: Option<&'static str>,
}

impl QuickAction {
    /// Navigation entries in the sidebar, top to bottom (profile is pinned last).
    pub const SIDEBAR: [QuickAction; 4] = [
        QuickAction::AcknowledgeDashboard,
        QuickAction::OpenAnalytics,
        QuickAction::OpenRiskSettings,
        QuickAction::OpenProfile,
    ];

    /// Buttons in the quick-action panel.
    pub const PANEL: [QuickAction; 2] = [QuickAction::UploadStatement, QuickAction::AddExpense];

    pub fn label(&self) -> &'static str {
        match self {
            QuickAction::AcknowledgeDashboard => "Dashboard",
            QuickAction::OpenAnalytics => "Analytics",
            QuickAction::OpenRiskSettings => "Risk Settings",
            QuickAction::OpenProfile => "Profile",
            QuickAction::UploadStatement => "Upload Statement",
            QuickAction::AddExpense => "Add Expense",
        }
    }

    pub fn notification(&self) -> Notification {
        let (kind, title, detail) = match self {
            QuickAction::AcknowledgeDashboard => (NotificationKind::Info, "Dashboard active", None),
            QuickAction::OpenAnalytics => (NotificationKind::Info, "Analytics incoming", None),
            QuickAction::OpenRiskSettings => (NotificationKind::Info, "Risk Settings", None),
            QuickAction::OpenProfile => (NotificationKind::Info, "Profile Switcher", None),
            QuickAction::UploadStatement => (
                NotificationKind::Success,
                "Upload successful",
                Some("Processing bank statement..."),
            ),
            QuickAction::AddExpense => (NotificationKind::Success, "Expense form opened", None),
        };
        Notification {
            kind,
            title,
            detail,
        }
    }
}

/// Receives the notification produced by each user action.
pub trait ActionNotifier {
    fn notify(&self, notification: Notification);
}

impl<F: Fn(Notification)> ActionNotifier for F {
    fn notify(&self, notification: Notification) {
        self(notification)
    }
}

/// Emits exactly one notification for `action`, synchronously.
pub fn dispatch<N: ActionNotifier + ?Sized>(action: QuickAction, notifier: &N) {
    debug!(?action, "Quick action clicked");
    notifier.notify(action.notification());
}
