#![no_main]

use libfuzzer_sys::fuzz_target;

use eager_buffer::local_nb::producer::SyncToLocalNb;
use eager_buffer::prelude::*;
use eager_buffer::sync::producer::TestProducer;

fuzz_target!(|data: TestProducer<u16, u16, u16>| {
    smol::block_on(async {
        let mut control = data.clone();
        let mut pro = eager_buffer::buffer(SyncToLocalNb(data));

        // Without an error, everything is passed through. With an error, the
        // error is replayed from the very first pull on.
        let mut expected = vec![];
        let failed = loop {
            match control.produce() {
                Ok(Left(item)) => expected.push(item),
                Ok(Right(_)) => break None,
                Err(err) => break Some(err),
            }
        };

        match failed {
            None => {
                for item in expected {
                    assert_eq!(pro.produce().await, Ok(Left(item)));
                }
                assert_eq!(pro.produce().await, Ok(Right(())));
            }
            Some(err) => {
                let got = pro.produce().await.unwrap_err();
                assert_eq!(got.into_write().and_then(|w| match w {
                    eager_buffer::WriteError::Source(e) => Some(e),
                    eager_buffer::WriteError::Buffer(_) => None,
                }), Some(err));
            }
        }
    });
});
