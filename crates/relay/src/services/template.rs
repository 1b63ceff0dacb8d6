use common::models::TradeSignal;

const DISCLAIMER: &str = "⚠️ تذكير: هذه التوصية للأغراض التعليمية فقط. يرجى إجراء البحث الخاص بك قبل اتخاذ أي قرارات استثمارية.";

pub fn render_signal(signal: &TradeSignal) -> String {
    format!(
        "🚀 توصية جديدة! 🚀\n\
         \n\
         🔸 الزوج: {pair}\n\
         ⏱️ الإطار الزمني: {timeframe}\n\
         📊 الاستراتيجية: {strategy}\n\
         \n\
         💹 سعر الدخول: {entry}\n\
         🛑 وقف الخسارة: {stop}\n\
         🎯 هدف الربح: {target}\n\
         \n\
         📝 ملاحظات:\n\
         {notes}\n\
         \n\
         {disclaimer}\n\
         \n\
         🍀 حظاً موفقاً وتداولاً آمناً! 🍀",
        pair = signal.pair,
        timeframe = signal.timeframe,
        strategy = signal.strategy,
        entry = signal.entry_price,
        stop = signal.stop_loss,
        target = signal.take_profit,
        notes = signal.notes,
        disclaimer = DISCLAIMER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn signal() -> TradeSignal {
        TradeSignal {
            pair: "BTC/USDT".to_string(),
            timeframe: "1h".to_string(),
            strategy: "EMA Cross".to_string(),
            entry_price: "65000".to_string(),
            stop_loss: "64000".to_string(),
            take_profit: "67000".to_string(),
            notes: "test".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_fields_render_in_label_order() {
        let text = render_signal(&signal());
        let positions: Vec<usize> = [
            "🔸 الزوج: BTC/USDT",
            "⏱️ الإطار الزمني: 1h",
            "📊 الاستراتيجية: EMA Cross",
            "💹 سعر الدخول: 65000",
            "🛑 وقف الخسارة: 64000",
            "🎯 هدف الربح: 67000",
            "📝 ملاحظات:\ntest",
        ]
        .iter()
        .map(|needle| text.find(needle).unwrap_or_else(|| panic!("missing {}", needle)))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);
    }

    #[test]
    fn test_banner_and_footer() {
        let text = render_signal(&signal());
        assert!(text.starts_with("🚀 توصية جديدة! 🚀\n"));
        assert!(text.contains(DISCLAIMER));
        assert!(text.ends_with("🍀 حظاً موفقاً وتداولاً آمناً! 🍀"));
    }

    #[test]
    fn test_empty_notes_render_blank_segment() {
        let mut s = signal();
        s.notes = String::new();
        let text = render_signal(&s);
        assert!(text.contains("📝 ملاحظات:\n\n\n⚠️"));
    }

    #[test]
    fn test_multiline_notes_are_kept() {
        let mut s = signal();
        s.notes = "watch 66k\nscale out at 70k".to_string();
        let text = render_signal(&s);
        assert!(text.contains("📝 ملاحظات:\nwatch 66k\nscale out at 70k\n"));
    }
}
