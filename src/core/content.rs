//! Built-in documentation corpus.
//!
//! The default content shown when no corpus file is configured: the
//! CleanSpeech library docs. Authored here as static data so the binary is
//! useful out of the box; `--docs` or the config file swap in another
//! corpus without touching this module.

use crate::core::corpus::{Corpus, CorpusMeta, DocCategory, DocItem};

fn item(id: &str, title: &str, body: &str) -> DocItem {
    DocItem {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
    }
}

/// The corpus used when no `docs_path` is configured.
pub fn builtin() -> Corpus {
    let categories = vec![
        DocCategory {
            title: "Getting Started".to_string(),
            items: vec![
                item(
                    "introduction",
                    "Introduction",
                    r#"Welcome to **CleanSpeech**. This library provides a robust toolkit for processing conversational audio data and cleaning text transcripts for NLP tasks.

Designed for researchers and developers, CleanSpeech simplifies the pipeline from raw audio to clean, tokenizable text. It is optimized for handling large datasets and custom conversational data.

## Key Features

- High-performance Audio-to-Text transcription pipeline.
- Advanced text preprocessing (URL removal, symbol stripping).
- Redundancy detection for conversational datasets.
- Pandas-compatible API.
"#,
                ),
                item(
                    "installation",
                    "Installation",
                    r#"Install CleanSpeech using pip. We recommend using a virtual environment.

```bash
pip install cleanspeech
```

Or install from source:

```bash
git clone https://github.com/example/cleanspeech.git
cd cleanspeech
pip install -e .
```
"#,
                ),
            ],
        },
        DocCategory {
            title: "Audio Processing".to_string(),
            items: vec![item(
                "audio-to-text",
                "1. Audio to Text",
                r#"The `AudioProcessor` class handles the conversion of raw audio files into text. It supports batch processing for large datasets.

## Basic Usage

Initialize the processor with your model of choice (default is 'base').

```python
from cleanspeech import AudioProcessor

# Initialize
processor = AudioProcessor(model='whisper-base')

# Transcribe a single file
result = processor.transcribe("path/to/audio.wav")
print(result.text)
```

## Batch Processing Custom Datasets

For custom datasets, use the `transcribe_batch` method. This method accepts a list of file paths or a directory.

```python
import glob

# Get all wav files
files = glob.glob("./my_dataset/*.wav")

# Process in batch with progress bar
results = processor.transcribe_batch(
    files,
    batch_size=16,
    export_format="pandas"
)

# Save to CSV
results.to_csv("raw_transcripts.csv")
```
"#,
            )],
        },
        DocCategory {
            title: "Text Preprocessing".to_string(),
            items: vec![item(
                "cleaning-text",
                "2. Cleaning Text",
                r#"Conversational text often contains noise like URLs, special symbols, and redundant phrases. The `TextCleaner` module provides a chainable API to clean this data.

## The Cleaning Pipeline

You can define a custom pipeline to apply specific cleaning rules.

```python
from cleanspeech import TextCleaner

cleaner = TextCleaner()

raw_text = "Check this out!!! https://example.com #wow"

# Chain methods
clean_text = (
    cleaner
    .set_text(raw_text)
    .remove_urls()
    .remove_symbols(keep_punctuation=False)
    .lowercase()
    .get()
)

print(clean_text)
# Output: "check this out wow"
```

## Handling Redundancy

In conversational datasets, users often repeat themselves. Use `deduplicate_sentences` to filter these out based on semantic similarity.

```python
# Remove redundant sentences within a conversation window
df['clean_text'] = cleaner.deduplicate_sentences(
    df['raw_text'],
    threshold=0.85
)
```
"#,
            )],
        },
        DocCategory {
            title: "Applications".to_string(),
            items: vec![item(
                "demo-application",
                "Live Demo",
                r#"Experience the power of CleanSpeech in real-time with our interactive demo application.

Upload your own audio files or paste raw text to see the cleaning pipeline in action. The demo showcases the full capabilities of the library, including noise reduction, entity extraction, and redundancy filtering.

## CleanSpeech Studio

A web-based interface for testing and visualizing the processing pipeline. No installation required.

> Launch it at [example.com/demo](https://example.com/demo)
"#,
            )],
        },
    ];

    let meta = CorpusMeta {
        name: "CleanSpeech".to_string(),
        version: Some("1.0.2".to_string()),
    };

    // Ids above are static and unique; a failure here is a programming error.
    Corpus::new(meta, categories).expect("built-in corpus is valid")
}
