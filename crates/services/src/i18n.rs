//! Static UI strings.
//!
//! Rows are ordered like `Language::ALL`. Feedback and result labels were
//! never translated to Hindi, Bengali or Telugu and fall back to English.

use quiz_core::model::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKey {
    Title,
    Subtitle,
    TabWelcome,
    TabQuiz,
    TabMemory,
    WelcomeTitle,
    SelectCategory,
    CategoryTechnical,
    CategoryProgramming,
    CategoryGeneral,
    CategoryAll,
    DifficultyLevel,
    Easy,
    Intermediate,
    Hard,
    QuestionCount,
    TimePerQuestion,
    Questions,
    Seconds,
    CorrectFeedback,
    CorrectAnswerWas,
    MemoryTitle,
    MemoryInstructions,
    MemoryStart,
    Moves,
    Time,
    Pairs,
    GameCompleted,
    MemoryScore,
    ContinueToQuiz,
    QuizComplete,
    YourScore,
    OutOf,
    TryAgain,
    ShareResult,
    AchievementsUnlocked,
    HalfwayHero,
    PerfectScore,
    QuizParticipant,
}

impl TextKey {
    pub const ALL: [TextKey; 39] = [
        TextKey::Title,
        TextKey::Subtitle,
        TextKey::TabWelcome,
        TextKey::TabQuiz,
        TextKey::TabMemory,
        TextKey::WelcomeTitle,
        TextKey::SelectCategory,
        TextKey::CategoryTechnical,
        TextKey::CategoryProgramming,
        TextKey::CategoryGeneral,
        TextKey::CategoryAll,
        TextKey::DifficultyLevel,
        TextKey::Easy,
        TextKey::Intermediate,
        TextKey::Hard,
        TextKey::QuestionCount,
        TextKey::TimePerQuestion,
        TextKey::Questions,
        TextKey::Seconds,
        TextKey::CorrectFeedback,
        TextKey::CorrectAnswerWas,
        TextKey::MemoryTitle,
        TextKey::MemoryInstructions,
        TextKey::MemoryStart,
        TextKey::Moves,
        TextKey::Time,
        TextKey::Pairs,
        TextKey::GameCompleted,
        TextKey::MemoryScore,
        TextKey::ContinueToQuiz,
        TextKey::QuizComplete,
        TextKey::YourScore,
        TextKey::OutOf,
        TextKey::TryAgain,
        TextKey::ShareResult,
        TextKey::AchievementsUnlocked,
        TextKey::HalfwayHero,
        TextKey::PerfectScore,
        TextKey::QuizParticipant,
    ];
}

/// Look up `key` in `language`.
#[must_use]
pub fn text(key: TextKey, language: Language) -> &'static str {
    let row = row(key);
    match language {
        Language::En => row[0],
        Language::Es => row[1],
        Language::Fr => row[2],
        Language::De => row[3],
        Language::Hi => row[4],
        Language::Bn => row[5],
        Language::Te => row[6],
    }
}

/// Same string in Hindi, Bengali and Telugu as in English.
const fn western(
    en: &'static str,
    es: &'static str,
    fr: &'static str,
    de: &'static str,
) -> [&'static str; 7] {
    [en, es, fr, de, en, en, en]
}

#[allow(clippy::too_many_lines)]
fn row(key: TextKey) -> [&'static str; 7] {
    match key {
        TextKey::Title => [
            "Interactive Quiz",
            "Cuestionario Interactivo",
            "Quiz Interactif",
            "Interaktives Quiz",
            "इंटरैक्टिव क्विज",
            "ইন্টারেক্টিভ কুইজ",
            "ఇంటరాక్టివ్ క్విజ్",
        ],
        TextKey::Subtitle => [
            "Test your knowledge with our animated quiz",
            "Pon a prueba tus conocimientos con nuestro cuestionario animado",
            "Testez vos connaissances avec notre quiz animé",
            "Testen Sie Ihr Wissen mit unserem animierten Quiz",
            "हमारी एनिमेटेड क्विज के साथ अपने ज्ञान का परीक्षण करें",
            "আমাদের অ্যানিমেটেড কুইজের সাথে আপনার জ্ঞান পরীক্ষা করুন",
            "మా యానిమేటెడ్ క్విజ్‌తో మీ జ్ఞానాన్ని పరీక్షించుకోండి",
        ],
        TextKey::TabWelcome => [
            "Welcome",
            "Bienvenido",
            "Bienvenue",
            "Willkommen",
            "स्वागत है",
            "স্বাগতম",
            "స్వాగతం",
        ],
        TextKey::TabQuiz => [
            "Quiz",
            "Cuestionario",
            "Quiz",
            "Quiz",
            "प्रश्नोत्तरी",
            "কুইজ",
            "క్విజ్",
        ],
        TextKey::TabMemory => [
            "Memory Game",
            "Juego de Memoria",
            "Jeu de Mémoire",
            "Gedächtnisspiel",
            "स्मृति खेल",
            "মেমরি গেম",
            "మెమరీ గేమ్",
        ],
        TextKey::WelcomeTitle => [
            "Welcome to the Quiz Challenge!",
            "¡Bienvenido al Desafío del Cuestionario!",
            "Bienvenue au Quiz Challenge!",
            "Willkommen zur Quiz-Challenge!",
            "क्विज चैलेंज में आपका स्वागत है!",
            "কুইজ চ্যালেঞ্জে আপনাকে স্বাগতম!",
            "క్విజ్ ఛాలెంజ్‌కి స్వాగతం!",
        ],
        TextKey::SelectCategory => [
            "Select a category to start your quiz journey!",
            "¡Selecciona una categoría para comenzar tu viaje de cuestionario!",
            "Sélectionnez une catégorie pour commencer votre parcours de quiz!",
            "Wählen Sie eine Kategorie, um Ihre Quiz-Reise zu beginnen!",
            "अपनी प्रश्नोत्तरी यात्रा शुरू करने के लिए एक श्रेणी चुनें!",
            "আপনার কুইজ যাত্রা শুরু করতে একটি বিভাগ নির্বাচন করুন!",
            "మీ క్విజ్ ప్రయాణాన్ని ప్రారంభించడానికి వర్గాన్ని ఎంచుకోండి!",
        ],
        TextKey::CategoryTechnical => [
            "Technical Quiz",
            "Cuestionario Técnico",
            "Quiz Technique",
            "Technisches Quiz",
            "तकनीकी प्रश्नोत्तरी",
            "প্রযুক্তিগত কুইজ",
            "టెక్నికల్ క్విజ్",
        ],
        TextKey::CategoryProgramming => [
            "Programming Quiz",
            "Cuestionario de Programación",
            "Quiz de Programmation",
            "Programmier-Quiz",
            "प्रोग्रामिंग प्रश्नोत्तरी",
            "প্রোগ্রামিং কুইজ",
            "ప్రోగ్రామింగ్ క్విజ్",
        ],
        TextKey::CategoryGeneral => [
            "General Knowledge",
            "Conocimiento General",
            "Culture Générale",
            "Allgemeinwissen",
            "सामान्य ज्ञान",
            "সাধারণ জ্ঞান",
            "సాధారణ జ్ఞానం",
        ],
        TextKey::CategoryAll => [
            "Mix of Everything",
            "Mezcla de Todo",
            "Mélange de Tout",
            "Mix aus Allem",
            "सब कुछ का मिश्रण",
            "সবকিছুর মিশ্রণ",
            "అన్నింటి మిశ్రమం",
        ],
        TextKey::DifficultyLevel => [
            "Difficulty Level",
            "Nivel de Dificultad",
            "Niveau de Difficulté",
            "Schwierigkeitsgrad",
            "कठिनाई स्तर",
            "কঠিনতা স্তর",
            "కష్టం స్థాయి",
        ],
        TextKey::Easy => [
            "Easy", "Fácil", "Facile", "Einfach", "आसान", "সহজ", "సులభం",
        ],
        TextKey::Intermediate => [
            "Intermediate",
            "Intermedio",
            "Intermédiaire",
            "Mittelschwer",
            "मध्यम",
            "মাঝারি",
            "మధ్యస్థం",
        ],
        TextKey::Hard => [
            "Hard", "Difícil", "Difficile", "Schwer", "कठिन", "কঠিন", "కష్టం",
        ],
        TextKey::QuestionCount => [
            "Question Count",
            "Número de Preguntas",
            "Nombre de Questions",
            "Anzahl der Fragen",
            "प्रश्नों की संख्या",
            "প্রশ্নের সংখ্যা",
            "ప్రశ్నల సంఖ్య",
        ],
        TextKey::TimePerQuestion => [
            "Time Per Question",
            "Tiempo Por Pregunta",
            "Temps Par Question",
            "Zeit Pro Frage",
            "प्रति प्रश्न समय",
            "প্রতি প্রশ্নের সময়",
            "ప్రశ్న సమయం",
        ],
        TextKey::Questions => [
            "Questions",
            "Preguntas",
            "Questions",
            "Fragen",
            "प्रश्न",
            "প্রশ্ন",
            "ప్రశ్నలు",
        ],
        TextKey::Seconds => [
            "Seconds",
            "Segundos",
            "Secondes",
            "Sekunden",
            "सेकंड",
            "সেকেন্ড",
            "సెకన్లు",
        ],
        TextKey::CorrectFeedback => western(
            "Great job! That's the correct answer.",
            "¡Buen trabajo! Esa es la respuesta correcta.",
            "Bon travail! C'est la bonne réponse.",
            "Gute Arbeit! Das ist die richtige Antwort.",
        ),
        TextKey::CorrectAnswerWas => western(
            "The correct answer was:",
            "La respuesta correcta era:",
            "La bonne réponse était:",
            "Die richtige Antwort war:",
        ),
        TextKey::MemoryTitle => [
            "Memory Game",
            "Juego de Memoria",
            "Jeu de Mémoire",
            "Gedächtnisspiel",
            "स्मृति खेल",
            "মেমোরি গেম",
            "మెమరీ గేమ్",
        ],
        TextKey::MemoryInstructions => [
            "Match all pairs of cards in the fewest moves possible",
            "Empareja todas las tarjetas en la menor cantidad de movimientos posibles",
            "Associez toutes les paires de cartes en faisant le moins de mouvements possible",
            "Finde alle Kartenpaare mit möglichst wenigen Zügen",
            "कम से कम चालों में सभी कार्ड जोड़े मिलाएं",
            "সম্ভাব্য কম পদক্ষেপে সমস্ত কার্ড জোড়া মিলান",
            "వీలైనంత తక్కువ కదలికలలో అన్ని కార్డుల జతలను మ్యాచ్ చేయండి",
        ],
        TextKey::MemoryStart => [
            "Start Game",
            "Iniciar Juego",
            "Commencer le Jeu",
            "Spiel Starten",
            "खेल शुरू करें",
            "গেম শুরু করুন",
            "గేమ్ ప్రారంభించండి",
        ],
        TextKey::Moves => [
            "Moves",
            "Movimientos",
            "Mouvements",
            "Züge",
            "चालें",
            "পদক্ষেপ",
            "కదలికలు",
        ],
        TextKey::Time => [
            "Time", "Tiempo", "Temps", "Zeit", "समय", "সময়", "సమయం",
        ],
        TextKey::Pairs => [
            "Pairs", "Pares", "Paires", "Paare", "जोड़े", "জোড়া", "జతలు",
        ],
        TextKey::GameCompleted => [
            "Game Completed!",
            "¡Juego Completado!",
            "Jeu Terminé!",
            "Spiel Beendet!",
            "खेल पूरा हुआ!",
            "গেম সমাপ্ত!",
            "ఆట పూర్తయింది!",
        ],
        TextKey::MemoryScore => [
            "Your Score",
            "Tu Puntaje",
            "Votre Score",
            "Deine Punkte",
            "आपका स्कोर",
            "আপনার স্কোর",
            "మీ స్కోర్",
        ],
        TextKey::ContinueToQuiz => [
            "Continue to Quiz",
            "Continuar al Cuestionario",
            "Continuer vers le Quiz",
            "Weiter zum Quiz",
            "क्विज पर जारी रखें",
            "কুইজ চালিয়ে যান",
            "క్విజ్‌కి కొనసాగండి",
        ],
        TextKey::QuizComplete => western(
            "Quiz Complete!",
            "¡Cuestionario Completo!",
            "Quiz Terminé!",
            "Quiz abgeschlossen!",
        ),
        TextKey::YourScore => western(
            "Your score:",
            "Tu puntuación:",
            "Votre score:",
            "Ihr Ergebnis:",
        ),
        TextKey::OutOf => western("out of", "de", "sur", "von"),
        TextKey::TryAgain => western(
            "Try Again",
            "Intentar de nuevo",
            "Réessayer",
            "Erneut versuchen",
        ),
        TextKey::ShareResult => western(
            "Share Result",
            "Compartir resultado",
            "Partager le résultat",
            "Ergebnis teilen",
        ),
        TextKey::AchievementsUnlocked => western(
            "Achievements Unlocked",
            "Logros Desbloqueados",
            "Succès Débloqués",
            "Freigeschaltete Erfolge",
        ),
        TextKey::HalfwayHero => western(
            "Half-way Hero",
            "Héroe a medio camino",
            "Héros à mi-chemin",
            "Halbzeit-Held",
        ),
        TextKey::PerfectScore => western(
            "Perfect Score",
            "Puntuación perfecta",
            "Score parfait",
            "Perfekte Punktzahl",
        ),
        TextKey::QuizParticipant => western(
            "Quiz Participant",
            "Participante del cuestionario",
            "Participant au quiz",
            "Quiz-Teilnehmer",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_text_in_every_language() {
        for key in TextKey::ALL {
            for language in Language::ALL {
                assert!(!text(key, language).is_empty(), "{key:?} / {language}");
            }
        }
    }

    #[test]
    fn looks_up_by_language() {
        assert_eq!(text(TextKey::Title, Language::En), "Interactive Quiz");
        assert_eq!(text(TextKey::Moves, Language::De), "Züge");
        assert_eq!(text(TextKey::TabQuiz, Language::Bn), "কুইজ");
    }

    #[test]
    fn untranslated_result_labels_use_english() {
        assert_eq!(text(TextKey::TryAgain, Language::Hi), "Try Again");
        assert_eq!(text(TextKey::TryAgain, Language::Fr), "Réessayer");
    }
}
