use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::Modal;
use crate::contexts::BrowserTicketGate;
use crate::ticket_gate::{FormStatus, GateFlow, GatePhase, Verification};

#[derive(Properties, PartialEq)]
pub struct TicketGateModalProps {
    pub gate: BrowserTicketGate,
    /// Snapshot of the gate state to render.
    pub flow: GateFlow,
}

/// Email (and passcode) form shown before a ticket redirect.
#[function_component]
pub fn TicketGateModal(props: &TicketGateModalProps) -> Html {
    let flow = &props.flow;
    if !flow.is_open() {
        return html! {};
    }

    let session = flow.session();
    let phase = flow.phase();
    let pending = session.is_pending();

    let on_close = {
        let gate = props.gate.clone();
        Callback::from(move |_: ()| gate.close())
    };

    let on_submit = {
        let gate = props.gate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let gate = gate.clone();
            yew::platform::spawn_local(async move { gate.submit().await });
        })
    };

    let on_email_input = {
        let gate = props.gate.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            gate.set_email(input.value());
        })
    };

    let on_otp_input = {
        let gate = props.gate.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            gate.set_otp(input.value());
        })
    };

    let on_change_email = {
        let gate = props.gate.clone();
        Callback::from(move |_: MouseEvent| gate.change_email())
    };

    let description = match (flow.verification(), phase.wants_otp()) {
        (_, true) => "Enter the code we emailed you to unlock tickets.",
        (Verification::Otp, false) => {
            "Enter your email and we'll send you a one-time code."
        }
        (Verification::Direct, false) => {
            "Enter your email to continue to tickets."
        }
    };

    let submit_label = match phase {
        GatePhase::Submitting => "Submitting...",
        GatePhase::SendingOtp => "Sending code...",
        GatePhase::VerifyingOtp => "Verifying...",
        GatePhase::AwaitingOtp => "Verify Code",
        GatePhase::Done => "Redirecting...",
        _ => match flow.verification() {
            Verification::Direct => "Get Tickets",
            Verification::Otp => "Send Code",
        },
    };

    let message_class = match session.status {
        FormStatus::Error => "text-sm text-red-600",
        FormStatus::Success => "text-sm text-green-600",
        FormStatus::Idle | FormStatus::Pending => "text-sm text-gray-600",
    };

    let email_locked = phase != GatePhase::CollectingEmail;

    html! {
        <Modal on_close={on_close} title="Get your tickets">
            <div>
                <p class="text-gray-600 mb-4">{description}</p>
                <form onsubmit={on_submit} class="space-y-4">
                    <div>
                        <label for="gate-email" class="block text-sm font-medium text-gray-700 mb-1">
                            {"Email Address"}
                        </label>
                        <input
                            type="email"
                            id="gate-email"
                            required={true}
                            readonly={email_locked}
                            value={session.email.clone()}
                            oninput={on_email_input}
                            autocomplete="email"
                            placeholder="Enter your email"
                            class="w-full p-2 border rounded focus:outline-none \
                                   focus:ring-2 focus:ring-purple-500 \
                                   read-only:bg-gray-100"
                        />
                    </div>

                    if phase.wants_otp() {
                        <div>
                            <label for="gate-otp" class="block text-sm font-medium text-gray-700 mb-1">
                                {"One-time code"}
                            </label>
                            <input
                                type="text"
                                id="gate-otp"
                                required={true}
                                inputmode="numeric"
                                autocomplete="one-time-code"
                                readonly={pending}
                                value={session.otp.clone()}
                                oninput={on_otp_input}
                                placeholder="123456"
                                class="w-full p-2 border rounded tracking-widest \
                                       focus:outline-none focus:ring-2 \
                                       focus:ring-purple-500"
                            />
                            if phase == GatePhase::AwaitingOtp {
                                <button
                                    type="button"
                                    onclick={on_change_email}
                                    class="mt-2 text-sm text-purple-700 hover:underline"
                                >
                                    {"Use a different email"}
                                </button>
                            }
                        </div>
                    }

                    if let Some(message) = &session.message {
                        <p class={message_class}>{message}</p>
                    }

                    <button
                        type="submit"
                        disabled={pending || phase == GatePhase::Done}
                        class="w-full bg-purple-700 text-white py-2 px-4 rounded \
                               hover:bg-purple-800 disabled:opacity-50 \
                               disabled:cursor-not-allowed"
                    >
                        {submit_label}
                    </button>
                </form>
            </div>
        </Modal>
    }
}
