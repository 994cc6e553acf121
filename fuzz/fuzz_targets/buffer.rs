#![no_main]

use libfuzzer_sys::fuzz_target;

use eager_buffer::local_nb::producer::TestProducer;
use eager_buffer::prelude::*;
use eager_buffer::{ThenError, WriteError};

fuzz_target!(|data: TestProducer<u16, u16, u16>| {
    smol::block_on(async {
        let control = data.clone();
        let mut pro = eager_buffer::buffer(data);

        for item in control.remaining() {
            match pro.produce().await {
                Ok(Left(it)) => assert_eq!(it, *item),
                Ok(Right(())) => panic!("the buffer ended early"),
                Err(ThenError::Write(WriteError::Source(_))) => return,
                Err(_) => panic!("buffering into a vec must not fail otherwise"),
            }
        }

        match pro.produce().await {
            Ok(Right(())) => {}
            Err(ThenError::Write(WriteError::Source(_))) => {}
            other => panic!("unexpected {:?}", other),
        }
    });
});
