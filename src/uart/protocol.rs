//frame format: [SYNC][TYPE][LEN][PAYLOAD...][CHECKSUM]
//              0xAA  1byte 1byte  LEN bytes   1byte
//checksum is the wrapping sum of TYPE, LEN and PAYLOAD

pub const SYNC_BYTE: u8 = 0xAA;
pub const MAX_MSG_SIZE: usize = 244;
pub const SIGNAL_PAYLOAD_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MsgType{
    Signal = 0x03,
}

impl MsgType{
    pub fn from_u8(val: u8) -> Option<Self>{
        match val{
            0x03 => Some(MsgType::Signal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame{
    pub msg_type: MsgType,
    pub payload: Vec<u8>,
}

pub fn checksum(data: &[u8]) -> u8{
    data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

pub fn encode_frame(msg_type: MsgType, payload: &[u8]) -> std::io::Result<Vec<u8>>{
    if payload.len() > MAX_MSG_SIZE{
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Payload too large"
        ));
    }

    let mut frame = Vec::with_capacity(4 + payload.len());
    frame.push(SYNC_BYTE);
    frame.push(msg_type as u8);
    frame.push(payload.len() as u8);
    frame.extend_from_slice(payload);
    frame.push(checksum(&frame[1..]));
    Ok(frame)
}

pub fn encode_signal(word: u32) -> Vec<u8>{
    let payload = word.to_le_bytes();
    let mut frame = Vec::with_capacity(4 + SIGNAL_PAYLOAD_SIZE);
    frame.extend_from_slice(&[SYNC_BYTE, MsgType::Signal as u8, SIGNAL_PAYLOAD_SIZE as u8]);
    frame.extend_from_slice(&payload);
    frame.push(checksum(&frame[1..]));
    frame
}

pub fn signal_from_payload(payload: &[u8]) -> Option<u32>{
    let bytes: [u8; SIGNAL_PAYLOAD_SIZE] = payload.get(..SIGNAL_PAYLOAD_SIZE)?.try_into().ok()?;
    Some(u32::from_le_bytes(bytes))
}

/// Pulls the next valid frame off the front of `buffer`.
///
/// Garbage before a sync byte and frames with a bad checksum are
/// discarded; an incomplete frame is left in place for the next read.
pub fn decode_frame(buffer: &mut Vec<u8>) -> Option<Frame>{
    loop{
        let sync_pos = match buffer.iter().position(|&b| b == SYNC_BYTE){
            Some(pos) => pos,
            None =>{
                buffer.clear();
                return None;
            }
        };
        buffer.drain(..sync_pos);

        if buffer.len() < 4{
            return None;
        }

        let len = buffer[2] as usize;
        if len > MAX_MSG_SIZE{
            buffer.remove(0);
            continue;
        }

        let frame_len = 4 + len;
        if buffer.len() < frame_len{
            return None;
        }

        if buffer[3 + len] != checksum(&buffer[1..3 + len]){
            buffer.remove(0);
            continue;
        }

        let msg_type = MsgType::from_u8(buffer[1]);
        let payload = buffer[3..3 + len].to_vec();
        buffer.drain(..frame_len);

        if let Some(msg_type) = msg_type{
            return Some(Frame{ msg_type, payload });
        }
    }
}
