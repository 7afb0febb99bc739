use dashboard::{ActionNotifier, Notification, NotificationKind};
use yew::prelude::*;
use crate::settings;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastType {
    Info,
    Success,
    Error,
}

impl ToastType {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastType::Info => "alert-info",
            ToastType::Success => "alert-success",
            ToastType::Error => "alert-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastType::Info => "fas fa-info-circle",
            ToastType::Success => "fas fa-check-circle",
            ToastType::Error => "fas fa-exclamation-circle",
        }
    }
}

impl From<NotificationKind> for ToastType {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Info => ToastType::Info,
            NotificationKind::Success => ToastType::Success,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub title: String,
    pub description: Option<String>,
    pub toast_type: ToastType,
}

impl From<Notification> for ToastMessage {
    fn from(notification: Notification) -> Self {
        Self {
            title: notification.title.to_string(),
            description: notification.detail.map(str::to_string),
            toast_type: notification.kind.into(),
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub message: ToastMessage,
}

#[derive(Clone, PartialEq)]
pub struct ToastContext {
    pub toasts: Vec<Toast>,
    pub add_toast: Callback<ToastMessage>,
    pub remove_toast: Callback<usize>,
}

impl ToastContext {
    pub fn show_error(&self, message: String) {
        self.add_toast.emit(ToastMessage {
            title: message,
            description: None,
            toast_type: ToastType::Error,
        });
    }
}

impl ActionNotifier for ToastContext {
    fn notify(&self, notification: Notification) {
        self.add_toast.emit(notification.into());
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let toasts = use_state(Vec::<Toast>::new);
    let next_id = use_mut_ref(|| 0usize);

    let add_toast = {
        let toasts = toasts.clone();
        let next_id = next_id.clone();

        Callback::from(move |message: ToastMessage| {
            let id = {
                let mut next_id = next_id.borrow_mut();
                *next_id += 1;
                *next_id
            };
            log::debug!("Showing toast {}: {}", id, message.title);

            let mut new_toasts = (*toasts).clone();
            new_toasts.push(Toast { id, message });
            toasts.set(new_toasts);

            let toasts_clone = toasts.clone();
            let duration = settings::get_settings().toast_duration_ms;
            gloo_timers::callback::Timeout::new(duration, move || {
                let mut new_toasts = (*toasts_clone).clone();
                new_toasts.retain(|t| t.id != id);
                toasts_clone.set(new_toasts);
            })
            .forget();
        })
    };

    let remove_toast = {
        let toasts = toasts.clone();

        Callback::from(move |id: usize| {
            let mut new_toasts = (*toasts).clone();
            new_toasts.retain(|t| t.id != id);
            toasts.set(new_toasts);
        })
    };

    let context = ToastContext {
        toasts: (*toasts).clone(),
        add_toast,
        remove_toast: remove_toast.clone(),
    };

    html! {
        <ContextProvider<ToastContext> context={context}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for (*toasts).iter().map(|toast| {
                    let id = toast.id;
                    let on_close = {
                        let remove_toast = remove_toast.clone();
                        Callback::from(move |_| remove_toast.emit(id))
                    };

                    html! {
                        <div key={id} class={classes!("alert", toast.message.toast_type.alert_class(), "shadow-lg")}>
                            <i class={toast.message.toast_type.icon()}></i>
                            <div class="flex flex-col">
                                <span class="font-semibold">{&toast.message.title}</span>
                                {if let Some(description) = &toast.message.description {
                                    html! { <span class="text-sm">{description}</span> }
                                } else {
                                    html! {}
                                }}
                            </div>
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard::{dispatch, QuickAction};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_context() -> (ToastContext, Rc<RefCell<Vec<ToastMessage>>>) {
        let shown = Rc::new(RefCell::new(Vec::new()));
        let sink = shown.clone();
        let context = ToastContext {
            toasts: Vec::new(),
            add_toast: Callback::from(move |message: ToastMessage| sink.borrow_mut().push(message)),
            remove_toast: Callback::noop(),
        };
        (context, shown)
    }

    #[test]
    fn test_notification_becomes_toast_message() {
        let message = ToastMessage::from(QuickAction::UploadStatement.notification());
        assert_eq!(message.title, "Upload successful");
        assert_eq!(message.description.as_deref(), Some("Processing bank statement..."));
        assert_eq!(message.toast_type, ToastType::Success);

        let message = ToastMessage::from(QuickAction::OpenProfile.notification());
        assert_eq!(message.title, "Profile Switcher");
        assert_eq!(message.toast_type, ToastType::Info);
    }

    #[test]
    fn test_context_routes_errors_and_actions() {
        let (context, shown) = recording_context();

        context.show_error("Forecast provider unavailable: offline".to_string());
        dispatch(QuickAction::AddExpense, &context);

        let shown = shown.borrow();
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].toast_type, ToastType::Error);
        assert_eq!(shown[0].title, "Forecast provider unavailable: offline");
        assert_eq!(shown[1].title, "Expense form opened");
        assert_eq!(shown[1].toast_type, ToastType::Success);
    }
}
