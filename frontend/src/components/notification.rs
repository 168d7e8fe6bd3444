use yew::prelude::*;
use gloo_timers::callback::Timeout;

const AUTO_DISMISS_MS: u32 = 6000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// One message shown in a toast. `serial` tells repeated identical
/// messages apart so each one gets a fresh auto-dismiss timer.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: ToastKind,
    pub message: AttrValue,
    serial: u32,
}

impl Notice {
    pub fn follow(previous: Option<&Notice>, kind: ToastKind, message: impl Into<AttrValue>) -> Self {
        Self {
            kind,
            message: message.into(),
            serial: previous.map_or(0, |n| n.serial.wrapping_add(1)),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub notice: Notice,
    pub on_dismiss: Callback<()>,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let latest_dismiss = use_mut_ref(|| props.on_dismiss.clone());
    *latest_dismiss.borrow_mut() = props.on_dismiss.clone();

    // Restart the auto-hide timer whenever a new notice comes in
    use_effect_with_deps(
        move |_| {
            let timeout = Timeout::new(AUTO_DISMISS_MS, move || {
                let on_dismiss = latest_dismiss.borrow().clone();
                on_dismiss.emit(());
            });
            move || drop(timeout)
        },
        props.notice.clone(),
    );

    let dismiss = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };

    let kind_class = match props.notice.kind {
        ToastKind::Success => "toast-success",
        ToastKind::Error => "toast-error",
    };

    html! {
        <div class={classes!("toast", kind_class)} role="status">
            <span class="toast-message">{props.notice.message.clone()}</span>
            <button class="toast-dismiss" onclick={dismiss} aria-label="Dismiss">{"✕"}</button>
            <style>
                {r#"
                    @keyframes toastIn {
                        from { transform: translateY(20px); opacity: 0; }
                        to { transform: translateY(0); opacity: 1; }
                    }
                    .toast {
                        position: fixed;
                        right: 1.5rem;
                        bottom: 6rem;
                        z-index: 1100;
                        max-width: 360px;
                        display: flex;
                        align-items: flex-start;
                        gap: 0.8rem;
                        padding: 1rem 1.2rem;
                        border-radius: 12px;
                        box-shadow: 0 12px 28px rgba(0, 0, 0, 0.15);
                        animation: toastIn 0.3s ease-out forwards;
                        background: #fff;
                    }
                    .toast-success {
                        border-left: 4px solid #2f7d5b;
                    }
                    .toast-error {
                        border-left: 4px solid #c0392b;
                    }
                    .toast-dismiss {
                        border: none;
                        background: none;
                        cursor: pointer;
                        color: #777;
                    }
                "#}
            </style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_message_is_a_new_notice() {
        let first = Notice::follow(None, ToastKind::Error, "offline");
        let second = Notice::follow(Some(&first), ToastKind::Error, "offline");
        assert_ne!(first, second);
        assert_eq!(second.message, first.message);
    }

    #[test]
    fn kind_change_alone_is_a_new_notice() {
        let first = Notice::follow(None, ToastKind::Success, "done");
        let mut same_serial = first.clone();
        same_serial.kind = ToastKind::Error;
        assert_ne!(first, same_serial);
    }
}
