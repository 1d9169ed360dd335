//! Prompts and response schemas sent with every request.
//!
//! Prompts are written in Indonesian, the language of the meanings.

use mufrodat_types::VocabularyEntry;
use serde_json::{Value, json};

const PARSE_INSTRUCTIONS: &str = r#"Anda adalah ahli linguistik Arab yang sangat teliti. Tugas Anda adalah mengurai blok teks dari pengguna untuk mengekstrak beberapa mufrodat dan frasa "islahul lughoh".

Instruksi:
1.  Abaikan semua metadata seperti judul, hari, tanggal, dan topik. Fokus hanya pada daftar mufrodat dan bagian "islahul lughoh".
2.  Setiap mufrodat biasanya ditandai dengan tanda hubung (-) di awal. Baris pertama berisi bentuk Arab (mufrad, mutsanna, jamak) dan baris di bawahnya adalah artinya dalam Bahasa Indonesia. Ekstrak informasi ini ke dalam objek JSON.
3.  Bagian "إِصْلَاحُ اللُّغَةِ" berisi frasa atau kalimat. Perlakukan setiap item di sini sebagai entri vocabulary terpisah.
4.  Untuk item "islahul lughoh":
    -   Gunakan frasa Arab sebagai nilai 'singular'.
    -   Gunakan terjemahan Indonesianya sebagai 'meaning'.
    -   Biarkan 'dual' dan 'plural' sebagai string kosong.
    -   Isi 'notes' dengan "Islahul Lughoh".
5.  Kembalikan semua item yang diekstrak sebagai array di dalam objek JSON sesuai dengan skema yang disediakan. Pastikan tidak ada teks lain di luar objek JSON utama.

Contoh Input Pengguna:
```
الموضوع: فِيْ البيت

- غَسَّالَةٌ - غَسَّالَتَانِ - غَسَّالَاتٌ
Mesin cuci
- لِحَافٌ - لِحَافَانِ - لُحُفٌ
Selimut
__________

إِصْلَاحُ اللُّغَةِ

- أَنَا مُتْعَبٌ/مُتْعَبَةٌ.
      Aku lelah.
```

Contoh Output JSON yang Diharapkan:
```json
{
  "vocabulary": [
    { "singular": "غَسَّالَةٌ", "dual": "غَسَّالَتَانِ", "plural": "غَسَّالَاتٌ", "meaning": "Mesin cuci", "notes": "" },
    { "singular": "لِحَافٌ", "dual": "لِحَافَانِ", "plural": "لُحُفٌ", "meaning": "Selimut", "notes": "" },
    { "singular": "أَنَا مُتْعَبٌ/مُتْعَبَةٌ.", "dual": "", "plural": "", "meaning": "Aku lelah.", "notes": "Islahul Lughoh" }
  ]
}
```
"#;

pub fn parse_prompt(text: &str) -> String {
    format!(
        "{PARSE_INSTRUCTIONS}\nSekarang, proses input pengguna berikut:\nInput Pengguna: \"{text}\"\n"
    )
}

/// Lists only the Arabic forms of each entry
pub fn quiz_prompt(entries: &[VocabularyEntry], count: usize) -> String {
    let forms: Vec<Value> = entries
        .iter()
        .map(|entry| {
            json!({
                "singular": entry.singular(),
                "dual": entry.dual().unwrap_or_default(),
                "plural": entry.plural().unwrap_or_default(),
            })
        })
        .collect();

    format!(
        "Anda adalah seorang ahli guru Bahasa Arab yang membuat kuis. Berdasarkan daftar kosakata berikut, \
buatlah kuis pilihan ganda dengan {count} pertanyaan. Pertanyaan harus menguji pengetahuan pengguna \
tentang bentuk tunggal (mufrad), ganda (mutsanna), dan jamak (jamak').\n\n\
Untuk setiap pertanyaan, berikan pertanyaan yang jelas dalam Bahasa Indonesia, empat pilihan jawaban \
dalam Bahasa Arab, dan sebutkan jawaban yang benar. Pastikan pilihan yang salah masuk akal tetapi salah.\n\n\
Kuis harus dikembalikan dalam format JSON terstruktur sesuai dengan skema yang disediakan. \
Jangan sertakan teks apa pun di luar struktur JSON.\n\n\
Berikut adalah daftar kosakatanya:\n{}\n",
        Value::Array(forms)
    )
}

pub fn parse_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "vocabulary": {
                "type": "ARRAY",
                "description": "Sebuah array dari mufrodat dan catatan bahasa yang berhasil diekstrak.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "singular": { "type": "STRING", "description": "Bentuk tunggal (mufrad) dalam bahasa Arab." },
                        "dual": { "type": "STRING", "description": "Bentuk ganda (mutsanna) dalam bahasa Arab. Kosongkan jika tidak ada." },
                        "plural": { "type": "STRING", "description": "Bentuk jamak (jamak') dalam bahasa Arab. Kosongkan jika tidak ada." },
                        "meaning": { "type": "STRING", "description": "Arti kata dalam Bahasa Indonesia." },
                        "notes": { "type": "STRING", "description": "Catatan tata bahasa atau islahul lughoh. Kosongkan jika tidak ada." }
                    },
                    "required": ["singular", "meaning"]
                }
            }
        },
        "required": ["vocabulary"]
    })
}

pub fn quiz_schema(count: usize) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "quiz": {
                "type": "ARRAY",
                "description": format!("An array of {count} quiz questions."),
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING", "description": "The quiz question in Bahasa Indonesia." },
                        "options": {
                            "type": "ARRAY",
                            "description": "An array of 4 possible answers, in Arabic.",
                            "items": { "type": "STRING" }
                        },
                        "correctAnswer": {
                            "type": "STRING",
                            "description": "The correct answer from the options array, exactly matching one of the options."
                        }
                    },
                    "required": ["question", "options", "correctAnswer"]
                }
            }
        },
        "required": ["quiz"]
    })
}
